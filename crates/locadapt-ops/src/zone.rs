//! Spatial zone classifier.
//!
//! A zone is an ellipse or rectangle around a center with four independent
//! half-extents (right, left, down, up). Every pixel falls into one of three
//! classes:
//!
//! - [`Zone::Inside`] - within `feather` of the extents, full effect
//! - [`Zone::Transition`] - between the feathered and the full extents
//! - [`Zone::Outside`] - untouched
//!
//! ```text
//!                   up
//!            +------+------+
//!            |  (L,U)|(R,U) |
//!      left  +------c------+  right
//!            |  (L,D)|(R,D) |
//!            +------+------+
//!                  down
//! ```
//!
//! The quadrant is picked by `x >= cx` and `y >= cy`, so pixels on the
//! center lines belong to the right and down halves.
//!
//! # Example
//!
//! ```rust
//! use locadapt_ops::zone::{Extents, Shape, Zone, ZoneGeometry};
//!
//! let extents = Extents::uniform(50.0);
//! let zone = ZoneGeometry::new((100.0, 100.0), extents, 0.6, Shape::Ellipse).unwrap();
//! assert_eq!(zone.classify(100.0, 100.0), Zone::Inside);
//! assert!(matches!(zone.classify(140.0, 100.0), Zone::Transition(_)));
//! assert_eq!(zone.classify(200.0, 100.0), Zone::Outside);
//! ```

use crate::{OpsError, OpsResult};
use locadapt_core::Rect;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Zone outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shape {
    /// Four quarter-ellipses with a cosine transition.
    #[default]
    #[serde(rename = "eli", alias = "ellipse")]
    Ellipse,
    /// Four quarter-rectangles with a linear transition.
    #[serde(rename = "rec", alias = "rectangle")]
    Rectangle,
}

/// Classification of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    /// No effect.
    Outside,
    /// Partial effect, factor in `[0, 1]`.
    Transition(f32),
    /// Full effect.
    Inside,
}

impl Zone {
    /// Blend factor: 0 outside, 1 inside.
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            Zone::Outside => 0.0,
            Zone::Transition(f) => f,
            Zone::Inside => 1.0,
        }
    }
}

/// Half-extents of a zone in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Toward +x
    pub right: f32,
    /// Toward −x
    pub left: f32,
    /// Toward +y
    pub down: f32,
    /// Toward −y
    pub up: f32,
}

impl Extents {
    /// Same extent in all four directions.
    pub const fn uniform(r: f32) -> Self {
        Self { right: r, left: r, down: r, up: r }
    }
}

/// Validated zone description in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGeometry {
    center: (f32, f32),
    extents: Extents,
    rotation_deg: f32,
    feather: f32,
    shape: Shape,
    // (extent_x, extent_y) indexed by right | down << 1
    quadrants: [(f32, f32); 4],
    cos_r: f32,
    sin_r: f32,
}

impl ZoneGeometry {
    /// Creates an unrotated zone.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidGeometry`] for a non-finite center, non-finite or
    /// non-positive extents, or `feather` outside the open interval `(0, 1)`.
    pub fn new(
        center: (f32, f32),
        extents: Extents,
        feather: f32,
        shape: Shape,
    ) -> OpsResult<Self> {
        if !(center.0.is_finite() && center.1.is_finite()) {
            return Err(OpsError::InvalidGeometry(format!("center must be finite, got {center:?}")));
        }
        for (name, v) in [
            ("right", extents.right),
            ("left", extents.left),
            ("down", extents.down),
            ("up", extents.up),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(OpsError::InvalidGeometry(format!(
                    "{name} extent must be > 0, got {v}"
                )));
            }
        }
        if !(feather > 0.0 && feather < 1.0) {
            return Err(OpsError::InvalidGeometry(format!(
                "feather must be in (0, 1), got {feather}"
            )));
        }
        Ok(Self {
            center,
            extents,
            rotation_deg: 0.0,
            feather,
            shape,
            quadrants: [
                (extents.left, extents.up),
                (extents.right, extents.up),
                (extents.left, extents.down),
                (extents.right, extents.down),
            ],
            cos_r: 1.0,
            sin_r: 0.0,
        })
    }

    /// Rotates the zone clockwise on screen (y down) by `degrees`.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite angle.
    pub fn with_rotation(mut self, degrees: f32) -> OpsResult<Self> {
        if !degrees.is_finite() {
            return Err(OpsError::InvalidGeometry(format!(
                "rotation must be finite, got {degrees}"
            )));
        }
        let (sin_r, cos_r) = degrees.to_radians().sin_cos();
        self.rotation_deg = degrees;
        self.cos_r = cos_r;
        self.sin_r = sin_r;
        Ok(self)
    }

    /// Zone center.
    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    /// Half-extents.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Rotation in degrees.
    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    /// Inner fraction `ach` of the extents that gets the full effect.
    pub fn feather(&self) -> f32 {
        self.feather
    }

    /// Outline.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Offset from the center in the zone's own (unrotated) frame.
    #[inline]
    fn local(&self, x: f32, y: f32) -> (f32, f32) {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        (dx * self.cos_r + dy * self.sin_r, -dx * self.sin_r + dy * self.cos_r)
    }

    /// Classifies the pixel at frame coordinates `(x, y)`.
    #[inline]
    pub fn classify(&self, x: f32, y: f32) -> Zone {
        let (dx, dy) = self.local(x, y);
        let (rx, ry) = self.quadrants[quadrant(dx, dy)];
        match self.shape {
            Shape::Ellipse => classify_ellipse(dx, dy, rx, ry, self.feather),
            Shape::Rectangle => classify_rectangle(dx, dy, rx, ry, self.feather),
        }
    }

    /// Frame-space bounds `(x0, y0, x1, y1)` of the zone, widened to cover
    /// the rotated outline.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let e = self.extents;
        let corners = [(-e.left, -e.up), (e.right, -e.up), (-e.left, e.down), (e.right, e.down)];
        let (cx, cy) = self.center;
        corners.iter().fold(
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            |(x0, y0, x1, y1), &(lx, ly)| {
                let x = cx + lx * self.cos_r - ly * self.sin_r;
                let y = cy + lx * self.sin_r + ly * self.cos_r;
                (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
            },
        )
    }

    /// Pixel bounding box of the zone clipped to `tile`, both in frame
    /// coordinates. `None` when the zone misses the tile.
    pub fn pixel_bounds(&self, tile: Rect) -> Option<Rect> {
        let (x0, y0, x1, y1) = self.bounds();
        let zone = Rect::from_signed_bounds(
            x0.floor() as i64,
            y0.floor() as i64,
            x1.ceil() as i64 + 1,
            y1.ceil() as i64 + 1,
        )?;
        zone.intersect(&tile)
    }
}

/// Index into the quadrant table. Offsets of exactly zero count as right
/// and down.
#[inline]
fn quadrant(dx: f32, dy: f32) -> usize {
    (dx >= 0.0) as usize | ((dy >= 0.0) as usize) << 1
}

#[inline]
fn classify_ellipse(dx: f32, dy: f32, rx: f32, ry: f32, ach: f32) -> Zone {
    let qx = dx / (ach * rx);
    let qy = dy / (ach * ry);
    if qx * qx + qy * qy < 1.0 {
        return Zone::Inside;
    }
    let ex = dx / rx;
    let ey = dy / ry;
    let r2 = ex * ex + ey * ey;
    if r2 < 1.0 {
        Zone::Transition(ellipse_factor(r2.sqrt(), ach))
    } else {
        Zone::Outside
    }
}

/// Raised-cosine falloff over the normalized elliptical radius, 1 at
/// `ach` and 0 at the outline.
#[inline]
fn ellipse_factor(radius: f32, ach: f32) -> f32 {
    let ap = PI / (1.0 - ach);
    let bp = PI - ap;
    (0.5 * (1.0 + (radius * ap + bp).cos())).clamp(0.0, 1.0)
}

#[inline]
fn classify_rectangle(dx: f32, dy: f32, rx: f32, ry: f32, ach: f32) -> Zone {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax < ach * rx && ay < ach * ry {
        Zone::Inside
    } else if ax < rx && ay < ry {
        Zone::Transition(rectangle_factor(dx, dy, rx, ry, ach))
    } else {
        Zone::Outside
    }
}

/// Linear falloff along the ray from the center to the rectangle edge.
#[inline]
fn rectangle_factor(kx: f32, ky: f32, rx: f32, ry: f32, ach: f32) -> f32 {
    const EPS: f32 = 1e-4;
    let krap = (rx / ry).abs();
    let slope = kx / (ky + EPS);
    let edge = if slope.abs() < krap {
        (ry * ry * (1.0 + slope * slope)).sqrt()
    } else {
        let inv = ky / (kx + EPS);
        (rx * rx * (1.0 + inv * inv)).sqrt()
    };
    let coef = (kx * kx + ky * ky).sqrt() / edge;
    let fact = (coef - 1.0) / (ach - 1.0);
    if fact.is_nan() { 0.0 } else { fact.clamp(0.0, 1.0) }
}

// ============================================================================
// GUI units
// ============================================================================

/// Zone parameters in the editor's units.
///
/// Positions are in `[-1000, 1000]` across the frame, extents in
/// `[0, 1500]` where 2000 is the full frame size, `transit` in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSpec {
    /// Horizontal center, −1000 (left edge) to 1000 (right edge)
    pub center_x: i32,
    /// Vertical center, −1000 (top) to 1000 (bottom)
    pub center_y: i32,
    /// Right extent
    pub loc_x: i32,
    /// Left extent
    pub loc_xl: i32,
    /// Down extent
    pub loc_y: i32,
    /// Up extent
    pub loc_yt: i32,
    /// Inner full-effect fraction in percent, 5..95
    pub transit: i32,
    /// Rotation in degrees, −180..180
    pub degree: f32,
    /// Spot radius for the reference color sample, 4..150
    pub circrad: i32,
    /// Outline
    pub shape: Shape,
}

impl Default for ZoneSpec {
    fn default() -> Self {
        Self {
            center_x: 0,
            center_y: 0,
            loc_x: 250,
            loc_xl: 250,
            loc_y: 250,
            loc_yt: 250,
            transit: 60,
            degree: 0.0,
            circrad: 18,
            shape: Shape::Ellipse,
        }
    }
}

impl ZoneSpec {
    /// Maps editor units onto a frame of `width × height` pixels.
    ///
    /// # Errors
    ///
    /// Values outside their editor ranges, or a degenerate frame.
    pub fn to_geometry(&self, width: u32, height: u32) -> OpsResult<ZoneGeometry> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidDimensions(format!("frame {width}x{height} is empty")));
        }
        check_range("center_x", self.center_x, -1000, 1000)?;
        check_range("center_y", self.center_y, -1000, 1000)?;
        for (name, v) in [
            ("loc_x", self.loc_x),
            ("loc_xl", self.loc_xl),
            ("loc_y", self.loc_y),
            ("loc_yt", self.loc_yt),
        ] {
            check_range(name, v, 0, 1500)?;
        }
        check_range("transit", self.transit, 5, 95)?;
        check_range("circrad", self.circrad, 4, 150)?;
        if !(-180.0..=180.0).contains(&self.degree) {
            return Err(OpsError::InvalidParameter(format!(
                "degree must be in [-180, 180], got {}",
                self.degree
            )));
        }

        let (w, h) = (width as f32, height as f32);
        let extents = Extents {
            right: w * self.loc_x as f32 / 2000.0,
            left: w * self.loc_xl as f32 / 2000.0,
            down: h * self.loc_y as f32 / 2000.0,
            up: h * self.loc_yt as f32 / 2000.0,
        };
        let center = (
            w * (self.center_x as f32 / 2000.0 + 0.5),
            h * (self.center_y as f32 / 2000.0 + 0.5),
        );
        let feather = self.transit as f32 / 100.0;
        ZoneGeometry::new(center, extents, feather, self.shape)?.with_rotation(self.degree)
    }
}

fn check_range(name: &str, v: i32, lo: i32, hi: i32) -> OpsResult<()> {
    if (lo..=hi).contains(&v) {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!("{name} must be in [{lo}, {hi}], got {v}")))
    }
}
