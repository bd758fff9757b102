//! Pixel blend engine.
//!
//! # Pipeline
//!
//! ```text
//! RGB · gain -> XYZ -> Lab ─────────────────────────── scratch 1
//!                         -> CIECAM02 (scene 5000 K)
//!                         -> CIECAM02⁻¹ (target)  ─── scratch 2
//! out = orig + factor · (RGB(scratch 2) / gain − orig)
//! ```
//!
//! Scratch buffers cover only the zone's bounding box clipped to the tile
//! and live for one call. Rows are processed in parallel; every pass writes
//! disjoint rows and reads shared, immutable state.
//!
//! # Example
//!
//! ```rust
//! use locadapt_core::{Image, WideGamut};
//! use locadapt_ops::{LocalAdaptParams, LocalAdaptation};
//!
//! let image = Image::<WideGamut>::filled(64, 48, [20000.0, 20000.0, 20000.0]);
//! let params = LocalAdaptParams {
//!     enabled: true,
//!     amount: 90,
//!     temperature: 7500,
//!     ..Default::default()
//! };
//!
//! let out = LocalAdaptation::new(params).unwrap().apply(&image).unwrap();
//! let center = out.pixel(32, 24);
//! assert!(center[2] > center[0]); // grey turns bluish toward the 7500 K target
//! assert_eq!(out.pixel(0, 0), image.pixel(0, 0)); // corners are outside the zone
//! ```

use crate::params::LocalAdaptParams;
use crate::zone::{Zone, ZoneGeometry};
use crate::{OpsError, OpsResult};
use locadapt_color::ciecam02::{AdaptationConstants, ChromaticAdapter, Surround, ViewingConditions};
use locadapt_color::{lab_to_xyz, rgb_to_xyz, working_space, xyz_to_lab, xyz_to_rgb};
use locadapt_core::{ColorSpace, Image, LabImage, Rect, RgbSpace, CHANNELS};
use locadapt_primaries::{temperature_to_white, WorkingSpace};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Temperature of the scene white the data is assumed to be balanced to.
pub const SCENE_TEMPERATURE: f64 = 5000.0;

/// Relative background luminance on both sides.
pub const BACKGROUND_LUMINANCE: f32 = 18.0;

/// Adapting luminance on both sides, cd/m².
pub const ADAPTING_LUMINANCE: f32 = 400.0;

/// Rows per rayon task, at minimum.
const MIN_ROWS_PER_TASK: usize = 16;

/// Localized chromatic adaptation of one image or tile.
#[derive(Debug, Clone)]
pub struct LocalAdaptation {
    params: LocalAdaptParams,
    working: Option<WorkingSpace>,
    gain: f32,
    origin: (u32, u32),
    frame_size: Option<(u32, u32)>,
    appearance_model_active: bool,
}

impl LocalAdaptation {
    /// Creates an engine for validated parameters.
    ///
    /// Defaults: gain 1, tile at the frame origin, frame size equal to the
    /// image, working space taken from the image's color space marker.
    pub fn new(params: LocalAdaptParams) -> OpsResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            working: None,
            gain: 1.0,
            origin: (0, 0),
            frame_size: None,
            appearance_model_active: false,
        })
    }

    /// RGB pre-scale, divided out after blending.
    pub fn with_gain(mut self, gain: f32) -> OpsResult<Self> {
        if !gain.is_finite() || gain <= 0.0 {
            return Err(OpsError::InvalidParameter(format!("gain must be > 0, got {gain}")));
        }
        self.gain = gain;
        Ok(self)
    }

    /// Position of the image inside the full frame.
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Full frame size the zone parameters refer to.
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some((width, height));
        self
    }

    /// Uses a registered working profile instead of the image marker.
    pub fn with_working_space(mut self, name: &str) -> OpsResult<Self> {
        self.working = Some(working_space(name)?);
        Ok(self)
    }

    /// Marks the full color appearance model as active; the local
    /// adaptation then steps aside.
    pub fn with_appearance_model_active(mut self, active: bool) -> Self {
        self.appearance_model_active = active;
        self
    }

    /// Parameters in use.
    pub fn params(&self) -> &LocalAdaptParams {
        &self.params
    }

    /// Whether [`apply`](Self::apply) will touch any pixel data.
    pub fn is_active(&self) -> bool {
        self.params.amount > 1 && !self.appearance_model_active && self.params.enabled
    }

    /// Solves the scene and destination viewing conditions.
    pub fn adapter(&self) -> OpsResult<ChromaticAdapter> {
        let d = self.params.amount.min(100) as f32 / 100.0;

        let scene_white = temperature_to_white(SCENE_TEMPERATURE).map(|v| v * 100.0);
        let scene = ViewingConditions::new(
            scene_white,
            BACKGROUND_LUMINANCE,
            ADAPTING_LUMINANCE,
            Surround::Average,
        )?
        .with_degree_of_adaptation(d)?;

        let [x, _, z] = temperature_to_white(self.params.temperature as f64);
        let target_white = [100.0 * x, 100.0 / self.params.luminance_scaling, 100.0 * z];
        let target = ViewingConditions::new(
            target_white,
            BACKGROUND_LUMINANCE,
            ADAPTING_LUMINANCE,
            self.params.surround,
        )?
        .with_degree_of_adaptation(d)?;

        let scene = AdaptationConstants::new(&scene);
        let target = AdaptationConstants::new(&target);
        debug!(
            d,
            scene_aw = scene.aw,
            target_aw = target.aw,
            fl = scene.fl,
            temperature = self.params.temperature,
            "viewing conditions"
        );
        Ok(ChromaticAdapter::new(scene, target))
    }

    /// Zone geometry in frame coordinates.
    pub fn geometry(&self, width: u32, height: u32) -> OpsResult<ZoneGeometry> {
        let (fw, fh) = self.frame_size.unwrap_or((width, height));
        self.params.zone.to_geometry(fw, fh)
    }

    /// Adapts `image`, returning a new image.
    ///
    /// When the engine is inactive or the zone misses the tile, the result
    /// shares the input's buffer and is bit-identical to it.
    pub fn apply<C: RgbSpace>(&self, image: &Image<C>) -> OpsResult<Image<C>> {
        if !self.is_active() {
            debug!(
                enabled = self.params.enabled,
                amount = self.params.amount,
                appearance_model_active = self.appearance_model_active,
                "local adaptation skipped"
            );
            return Ok(image.clone());
        }
        let working = self.working.unwrap_or_else(WorkingSpace::of::<C>);
        self.apply_with(image, &working)
    }

    fn apply_with<C: ColorSpace>(
        &self,
        image: &Image<C>,
        working: &WorkingSpace,
    ) -> OpsResult<Image<C>> {
        let (width, height) = image.dimensions();
        if image.is_empty() {
            return Ok(image.clone());
        }

        let geometry = self.geometry(width, height)?;
        let tile = Rect::new(self.origin.0, self.origin.1, width, height);
        let Some(bbox) = geometry.pixel_bounds(tile) else {
            debug!(?tile, "zone misses tile");
            return Ok(image.clone());
        };
        debug!(?bbox, working = working.name, gain = self.gain, "local adaptation");

        let adapter = self.adapter()?;
        let lab = self.to_lab(image, &bbox, working);
        let adapted = adapt_scratch(&lab, &adapter);
        drop(lab);

        let out = self.blend(image, &adapted, &bbox, &geometry, working);
        Ok(Image::from_data(width, height, out)?)
    }

    /// Scratch 1: bounding box of `image` in scaled Lab.
    fn to_lab<C: ColorSpace>(
        &self,
        image: &Image<C>,
        bbox: &Rect,
        working: &WorkingSpace,
    ) -> LabImage {
        let mut lab = LabImage::new(bbox.width, bbox.height);
        let row_len = lab.row_len();
        let x_off = (bbox.x - self.origin.0) as usize * CHANNELS;
        let y_off = bbox.y - self.origin.1;
        let gain = self.gain;

        lab.data_mut()
            .par_chunks_mut(row_len)
            .with_min_len(MIN_ROWS_PER_TASK)
            .enumerate()
            .for_each(|(by, row)| {
                let src = &image.row(y_off + by as u32)[x_off..x_off + row_len];
                for (dst, rgb) in row.chunks_exact_mut(CHANNELS).zip(src.chunks_exact(CHANNELS)) {
                    let scaled = [rgb[0] * gain, rgb[1] * gain, rgb[2] * gain];
                    let xyz = rgb_to_xyz(scaled, &working.to_xyz);
                    dst.copy_from_slice(&xyz_to_lab(xyz));
                }
            });
        lab
    }

    fn blend<C: ColorSpace>(
        &self,
        image: &Image<C>,
        adapted: &LabImage,
        bbox: &Rect,
        geometry: &ZoneGeometry,
        working: &WorkingSpace,
    ) -> Vec<f32> {
        let row_len = image.row_len();
        let (ox, oy) = self.origin;
        let gain = self.gain;
        let mut out = vec![0.0f32; image.data().len()];

        out.par_chunks_mut(row_len)
            .with_min_len(MIN_ROWS_PER_TASK)
            .enumerate()
            .for_each(|(y, row)| {
                let src = image.row(y as u32);
                let fy = oy.saturating_add(y as u32);
                if !bbox.spans_row(fy) {
                    row.copy_from_slice(src);
                    return;
                }
                for (x, (dst, orig)) in row
                    .chunks_exact_mut(CHANNELS)
                    .zip(src.chunks_exact(CHANNELS))
                    .enumerate()
                {
                    let fx = ox.saturating_add(x as u32);
                    let zone = geometry.classify(fx as f32, fy as f32);
                    if zone == Zone::Outside || !bbox.contains(fx, fy) {
                        dst.copy_from_slice(orig);
                        continue;
                    }
                    let lab = adapted.pixel(fx - bbox.x, fy - bbox.y);
                    let rgb = xyz_to_rgb(lab_to_xyz(lab), &working.from_xyz);
                    let f = zone.factor();
                    for c in 0..CHANNELS {
                        dst[c] = orig[c] + f * (rgb[c] / gain - orig[c]);
                    }
                }
            });
        trace!(rows = image.height(), "blend done");
        out
    }
}

/// Scratch 2: scratch 1 taken through the appearance space.
fn adapt_scratch(lab: &LabImage, adapter: &ChromaticAdapter) -> LabImage {
    let mut out = LabImage::new(lab.width(), lab.height());
    let row_len = lab.row_len();
    out.data_mut()
        .par_chunks_mut(row_len)
        .with_min_len(MIN_ROWS_PER_TASK)
        .zip(lab.data().par_chunks(row_len))
        .for_each(|(dst, src)| adapter.adapt_lab_row(src, dst));
    out
}

/// Adapts `image` with `params`, using the defaults of [`LocalAdaptation`].
pub fn adapt_local<C: RgbSpace>(
    image: &Image<C>,
    params: &LocalAdaptParams,
) -> OpsResult<Image<C>> {
    LocalAdaptation::new(params.clone())?.apply(image)
}
