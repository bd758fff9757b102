//! Automatic adaptation amount and luminance scaling.
//!
//! The scene's adapting luminance is estimated from exposure metadata:
//!
//! ```text
//! EV  = comp + log2(f² / shutter / (iso / 100)) + tone_comp + log2(raw_exposure)
//! ada = 2^(EV − 3)                       cd/m²
//! ```
//!
//! and mapped to an amount through one of two ladders. Temperatures inside
//! `[4000, 15000]` K use the typical ladder; colder or warmer targets use
//! the extreme ladder, scaled down further for underwater shots above
//! 20000 K. Missing or implausible metadata gives `ada = 2000`.

use crate::params::LocalAdaptParams;
use tracing::debug;

/// `ada` used when metadata is missing.
pub const FALLBACK_LUMINANCE: f32 = 2000.0;

/// Per-frame exposure metadata.
pub trait FrameMetadata {
    /// Aperture f-number; `0` when unknown.
    fn f_number(&self, frame: usize) -> f32;
    /// ISO speed; `0` when unknown.
    fn iso(&self, frame: usize) -> f32;
    /// Shutter time in seconds; `0` when unknown.
    fn shutter_speed(&self, frame: usize) -> f32;
    /// Exposure compensation in EV.
    fn exposure_compensation(&self, frame: usize) -> f64;
}

/// Metadata of a single-frame image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExposureInfo {
    /// Aperture f-number
    pub f_number: f32,
    /// ISO speed
    pub iso: f32,
    /// Shutter time in seconds
    pub shutter_speed: f32,
    /// Exposure compensation in EV
    pub exposure_compensation: f64,
}

impl FrameMetadata for ExposureInfo {
    fn f_number(&self, _frame: usize) -> f32 {
        self.f_number
    }

    fn iso(&self, _frame: usize) -> f32 {
        self.iso
    }

    fn shutter_speed(&self, _frame: usize) -> f32 {
        self.shutter_speed
    }

    fn exposure_compensation(&self, _frame: usize) -> f64 {
        self.exposure_compensation
    }
}

/// Processing state that shifts the estimate besides the metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureContext {
    /// Frame to read metadata from.
    pub frame: usize,
    /// Raw white-point exposure multiplier (linear).
    pub raw_exposure: f64,
    /// Tone-curve exposure compensation in EV.
    pub tone_curve_exposure_comp: f64,
    /// Global white balance switch; when off, local adaptation is off too.
    pub wb_enabled: bool,
}

impl Default for ExposureContext {
    fn default() -> Self {
        Self {
            frame: 0,
            raw_exposure: 1.0,
            tone_curve_exposure_comp: 0.0,
            wb_enabled: true,
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParams {
    /// Whether the effect stays enabled.
    pub enabled: bool,
    /// Final amount.
    pub amount: u8,
    /// Final luminance scaling.
    pub luminance_scaling: f64,
    /// Estimated scene luminance, `None` when disabled before estimation.
    pub scene_luminance: Option<f32>,
}

impl ResolvedParams {
    /// Copy of `params` with the resolved values written in.
    pub fn apply(&self, params: &LocalAdaptParams) -> LocalAdaptParams {
        LocalAdaptParams {
            enabled: self.enabled,
            amount: self.amount,
            luminance_scaling: self.luminance_scaling,
            ..params.clone()
        }
    }
}

/// Estimated adapting luminance of the scene in cd/m².
pub fn scene_luminance<M: FrameMetadata + ?Sized>(metadata: &M, ctx: &ExposureContext) -> f32 {
    let f = metadata.f_number(ctx.frame);
    let iso = metadata.iso(ctx.frame);
    let shutter = metadata.shutter_speed(ctx.frame);
    if !(f >= 0.3 && iso >= 5.0 && shutter >= 1e-5) {
        return FALLBACK_LUMINANCE;
    }

    let f = f as f64;
    let mut ev = metadata.exposure_compensation(ctx.frame)
        + (f * f / shutter as f64 / (iso as f64 / 100.0)).log2();
    ev += ctx.tone_curve_exposure_comp;
    if ctx.raw_exposure.is_finite() && ctx.raw_exposure > 0.0 {
        ev += ctx.raw_exposure.log2();
    }
    2f32.powf(ev as f32 - 3.0)
}

/// True when `temperature` is handled by the typical ladder.
#[inline]
pub fn is_typical_temperature(temperature: i32) -> bool {
    (4000..=15000).contains(&temperature)
}

fn typical_amount(ada: f32) -> u8 {
    const LADDER: [(f32, u8); 7] =
        [(5.0, 30), (10.0, 50), (30.0, 60), (100.0, 70), (300.0, 80), (500.0, 90), (1000.0, 95)];
    LADDER
        .iter()
        .find(|(limit, _)| ada < *limit)
        .map_or(95, |&(_, amount)| amount)
}

fn extreme_amount(ada: f32, temperature: i32) -> u8 {
    const LADDER: [(f32, f32); 7] = [
        (10.0, 2.0),
        (15.0, 3.0),
        (30.0, 5.0),
        (100.0, 50.0),
        (300.0, 80.0),
        (500.0, 90.0),
        (3000.0, 95.0),
    ];
    let kunder = if temperature > 20000 { 0.05 } else { 1.0 };
    if ada < 5.0 {
        return 1;
    }
    LADDER
        .iter()
        .find(|(limit, _)| ada < *limit)
        .map_or(100, |&(_, base)| (base * kunder) as u8)
}

/// Amount for a scene luminance at a target temperature.
///
/// ```rust
/// use locadapt_ops::estimator::amount_for;
///
/// assert_eq!(amount_for(150.0, 5500), 80);
/// assert_eq!(amount_for(150.0, 3000), 80);
/// assert_eq!(amount_for(150.0, 22000), 4);
/// ```
pub fn amount_for(ada: f32, temperature: i32) -> u8 {
    if is_typical_temperature(temperature) {
        typical_amount(ada)
    } else {
        extreme_amount(ada, temperature)
    }
}

/// Empirical luminance scaling for a tinted target.
pub fn luminance_scaling_for(temperature: i32, green: f64, amount: u8) -> f64 {
    let t = (temperature as f64).clamp(4000.0, 8000.0);
    let dt = ((t - 5000.0) / 1000.0).abs();
    let dg = green - 1.0;
    1.0 - 0.00055 * dt * dg * amount as f64
}

/// Resolves the automatic parameters.
///
/// Only `amount` (with `auto_amount`) and `luminance_scaling` (with
/// `auto_luminance_scaling`) are replaced; the scaling uses the final amount.
pub fn resolve<M: FrameMetadata + ?Sized>(
    params: &LocalAdaptParams,
    metadata: &M,
    ctx: &ExposureContext,
) -> ResolvedParams {
    let unchanged = ResolvedParams {
        enabled: false,
        amount: params.amount,
        luminance_scaling: params.luminance_scaling,
        scene_luminance: None,
    };
    if !ctx.wb_enabled || !params.enabled {
        debug!(wb_enabled = ctx.wb_enabled, enabled = params.enabled, "local adaptation disabled");
        return unchanged;
    }

    let ada = scene_luminance(metadata, ctx);
    let amount = if params.auto_amount {
        amount_for(ada, params.temperature)
    } else {
        params.amount
    };
    let luminance_scaling = if params.auto_luminance_scaling {
        luminance_scaling_for(params.temperature, params.green, amount)
    } else {
        params.luminance_scaling
    };

    debug!(ada, amount, luminance_scaling, temperature = params.temperature, "resolved adaptation");
    ResolvedParams {
        enabled: true,
        amount,
        luminance_scaling,
        scene_luminance: Some(ada),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn exposure(f_number: f32, iso: f32, shutter_speed: f32) -> ExposureInfo {
        ExposureInfo { f_number, iso, shutter_speed, exposure_compensation: 0.0 }
    }

    fn auto(temperature: i32) -> LocalAdaptParams {
        LocalAdaptParams {
            enabled: true,
            auto_amount: true,
            auto_luminance_scaling: true,
            temperature,
            ..Default::default()
        }
    }

    #[test]
    fn test_scene_luminance() {
        // f/4, 1/125 s, ISO 100: EV = log2(2000) ≈ 10.97
        let ada = scene_luminance(&exposure(4.0, 100.0, 1.0 / 125.0), &ExposureContext::default());
        assert_relative_eq!(ada, 250.0, max_relative = 1e-4);
    }

    #[test]
    fn test_context_shifts_ev() {
        let ctx = ExposureContext {
            raw_exposure: 2.0,
            tone_curve_exposure_comp: 1.0,
            ..Default::default()
        };
        let ada = scene_luminance(&exposure(4.0, 100.0, 1.0 / 125.0), &ctx);
        assert_relative_eq!(ada, 1000.0, max_relative = 1e-4);
    }

    #[test]
    fn test_missing_metadata_falls_back() {
        let ctx = ExposureContext::default();
        assert_eq!(scene_luminance(&exposure(0.0, 100.0, 0.01), &ctx), FALLBACK_LUMINANCE);
        assert_eq!(scene_luminance(&exposure(2.8, 0.0, 0.01), &ctx), FALLBACK_LUMINANCE);
        assert_eq!(scene_luminance(&exposure(2.8, 100.0, 0.0), &ctx), FALLBACK_LUMINANCE);
        assert_eq!(scene_luminance(&exposure(f32::NAN, 100.0, 0.01), &ctx), FALLBACK_LUMINANCE);
    }

    #[test]
    fn test_typical_ladder() {
        let cases = [
            (1.0, 30),
            (7.0, 50),
            (20.0, 60),
            (50.0, 70),
            (250.0, 80),
            (400.0, 90),
            (800.0, 95),
            (2000.0, 95),
        ];
        for (ada, expected) in cases {
            assert_eq!(amount_for(ada, 5000), expected, "ada {ada}");
        }
    }

    #[test]
    fn test_extreme_ladder() {
        let cases = [
            (1.0, 1),
            (7.0, 2),
            (12.0, 3),
            (20.0, 5),
            (50.0, 50),
            (250.0, 80),
            (400.0, 90),
            (2000.0, 95),
            (5000.0, 100),
        ];
        for (ada, expected) in cases {
            assert_eq!(amount_for(ada, 3000), expected, "ada {ada}");
            assert_eq!(amount_for(ada, 16000), expected, "ada {ada}");
        }
    }

    #[test]
    fn test_underwater_scaling() {
        assert_eq!(amount_for(1.0, 25000), 1);
        assert_eq!(amount_for(7.0, 25000), 0);
        assert_eq!(amount_for(50.0, 25000), 2);
        assert_eq!(amount_for(2000.0, 25000), 4);
        assert_eq!(amount_for(5000.0, 25000), 100);
    }

    #[test]
    fn test_ladder_boundaries() {
        assert_eq!(amount_for(100.0, 5000), 80);
        assert_eq!(amount_for(99.99, 5000), 70);
        assert_eq!(amount_for(50.0, 4000), 70);
        assert_eq!(amount_for(50.0, 15000), 70);
        assert_eq!(amount_for(50.0, 3999), 50);
    }

    #[test]
    fn test_luminance_scaling() {
        assert_eq!(luminance_scaling_for(5000, 1.2, 80), 1.0);
        assert_relative_eq!(
            luminance_scaling_for(7000, 1.2, 80),
            1.0 - 0.00055 * 2.0 * 0.2 * 80.0,
            epsilon = 1e-12
        );
        // clamped to 8000 K
        assert_relative_eq!(
            luminance_scaling_for(12000, 0.9, 50),
            1.0 + 0.00055 * 3.0 * 0.1 * 50.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_resolve_bright_scene() {
        // ada ≈ 250 at 5500 K
        let exif = exposure(4.0, 100.0, 1.0 / 125.0);
        let r = resolve(&auto(5500), &exif, &ExposureContext::default());
        assert!(r.enabled);
        assert_eq!(r.amount, 80);
    }

    #[test]
    fn test_resolve_dim_exposure() {
        // f/2.8, ISO 400, 1/125 s: EV ≈ 7.94, ada ≈ 30.6
        let exif = exposure(2.8, 400.0, 1.0 / 125.0);
        let r = resolve(&auto(5500), &exif, &ExposureContext::default());
        assert_relative_eq!(r.scene_luminance.unwrap(), 30.6, epsilon = 0.1);
        assert_eq!(r.amount, 70);
    }

    #[test]
    fn test_resolve_missing_exif() {
        let r = resolve(&auto(5000), &exposure(0.0, 0.0, 0.0), &ExposureContext::default());
        assert_eq!(r.scene_luminance, Some(2000.0));
        assert_eq!(r.amount, 95);
    }

    #[test]
    fn test_resolve_keeps_manual_values() {
        let params = LocalAdaptParams {
            enabled: true,
            amount: 33,
            luminance_scaling: 0.9,
            temperature: 7000,
            green: 1.3,
            ..Default::default()
        };
        let r = resolve(&params, &exposure(0.0, 0.0, 0.0), &ExposureContext::default());
        assert_eq!(r.amount, 33);
        assert_eq!(r.luminance_scaling, 0.9);
    }

    #[test]
    fn test_scaling_uses_final_amount() {
        let params = LocalAdaptParams { green: 1.2, ..auto(7000) };
        let r = resolve(&params, &exposure(0.0, 0.0, 0.0), &ExposureContext::default());
        assert_eq!(r.amount, 95);
        assert_relative_eq!(r.luminance_scaling, luminance_scaling_for(7000, 1.2, 95));
    }

    #[test]
    fn test_resolve_disabled() {
        let ctx = ExposureContext { wb_enabled: false, ..Default::default() };
        let r = resolve(&auto(5000), &exposure(4.0, 100.0, 0.01), &ctx);
        assert!(!r.enabled);
        assert_eq!(r.scene_luminance, None);
        let manual = LocalAdaptParams::default();
        let exif = exposure(4.0, 100.0, 0.01);
        assert!(!resolve(&manual, &exif, &ExposureContext::default()).enabled);

        let applied = r.apply(&auto(5000));
        assert!(!applied.enabled);
        assert_eq!(applied.temperature, 5000);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let e = exposure(5.6, 200.0, 1.0 / 60.0);
        let a = resolve(&auto(6000), &e, &ExposureContext::default());
        let b = resolve(&auto(6000), &e, &ExposureContext::default());
        assert_eq!(a, b);
    }
}
