//! Viewing conditions and the constants derived from them.
//!
//! [`ViewingConditions`] is validated once at construction; after that,
//! [`AdaptationConstants::new`] is a total function. The engine builds two
//! sets per run, one for the scene and one for the destination white.

use crate::ciecam02::transform::cone_response;
use crate::error::{ColorError, ColorResult};
use locadapt_math::CAT02;
use serde::{Deserialize, Serialize};

// ============================================================================
// Surround
// ============================================================================

/// CIECAM02 surround class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surround {
    /// Print or monitor viewed in a lit room.
    #[default]
    Average,
    /// Television in a dim room.
    Dim,
    /// Projection in a dark room.
    Dark,
}

/// Induction constants of a surround class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurroundFactors {
    /// Maximum degree of adaptation `F`.
    pub f: f32,
    /// Impact of surround `c`.
    pub c: f32,
    /// Chromatic induction factor `Nc`.
    pub nc: f32,
}

impl Surround {
    /// `(F, c, Nc)` for this surround.
    pub const fn factors(self) -> SurroundFactors {
        match self {
            Surround::Average => SurroundFactors { f: 1.0, c: 0.69, nc: 1.0 },
            Surround::Dim => SurroundFactors { f: 0.9, c: 0.59, nc: 0.9 },
            Surround::Dark => SurroundFactors { f: 0.8, c: 0.525, nc: 0.8 },
        }
    }
}

// ============================================================================
// Viewing Conditions
// ============================================================================

/// Inputs of the viewing-condition solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    whitepoint_xyz: [f64; 3],
    background_luminance: f32,
    adapting_luminance: f32,
    surround: SurroundFactors,
    degree_of_adaptation: Option<f32>,
}

impl ViewingConditions {
    /// Creates viewing conditions.
    ///
    /// `white` is XYZ scaled so that a white of the adapting field has
    /// `Y ≈ 100`; `yb` is the relative background luminance and `la` the
    /// adapting luminance in cd/m².
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidViewingConditions`] for non-finite
    /// values, a non-positive white `Y`, `yb` or `la`.
    pub fn new(white: [f64; 3], yb: f32, la: f32, surround: Surround) -> ColorResult<Self> {
        let [x, y, z] = white;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) || y <= 0.0 || x <= 0.0 || z <= 0.0 {
            return Err(ColorError::InvalidViewingConditions(format!(
                "white point must be positive, got ({x}, {y}, {z})"
            )));
        }
        if !yb.is_finite() || yb <= 0.0 {
            return Err(ColorError::InvalidViewingConditions(format!(
                "background luminance must be > 0, got {yb}"
            )));
        }
        if !la.is_finite() || la <= 0.0 {
            return Err(ColorError::InvalidViewingConditions(format!(
                "adapting luminance must be > 0, got {la}"
            )));
        }
        Ok(Self {
            whitepoint_xyz: white,
            background_luminance: yb,
            adapting_luminance: la,
            surround: surround.factors(),
            degree_of_adaptation: None,
        })
    }

    /// Replaces the computed degree of adaptation `D` with a fixed value.
    ///
    /// # Errors
    ///
    /// `d` must lie in `[0, 1]`.
    pub fn with_degree_of_adaptation(mut self, d: f32) -> ColorResult<Self> {
        if !(0.0..=1.0).contains(&d) {
            return Err(ColorError::InvalidValue(format!(
                "degree of adaptation must be in [0, 1], got {d}"
            )));
        }
        self.degree_of_adaptation = Some(d);
        Ok(self)
    }

    /// White point XYZ.
    pub fn whitepoint_xyz(&self) -> [f64; 3] {
        self.whitepoint_xyz
    }

    /// Relative background luminance `Yb`.
    pub fn background_luminance(&self) -> f32 {
        self.background_luminance
    }

    /// Adapting luminance `La`.
    pub fn adapting_luminance(&self) -> f32 {
        self.adapting_luminance
    }

    /// Surround induction factors.
    pub fn surround(&self) -> SurroundFactors {
        self.surround
    }

    /// Explicit `D`, if set.
    pub fn degree_of_adaptation_override(&self) -> Option<f32> {
        self.degree_of_adaptation
    }
}

// ============================================================================
// Adaptation Constants
// ============================================================================

/// Per-run CIECAM02 constants.
///
/// Everything the per-pixel transform needs that depends only on the
/// viewing conditions is computed here, once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptationConstants {
    /// Background induction ratio `n = Yb / Yw`
    pub n: f32,
    /// Degree of adaptation `D`
    pub d: f32,
    /// Brightness induction factor
    pub nbb: f32,
    /// Chromatic induction factor
    pub ncb: f32,
    /// Base exponent `z = 1.48 + √n`
    pub cz: f32,
    /// Achromatic response of the white
    pub aw: f32,
    /// Luminance-level adaptation factor `FL`
    pub fl: f32,
    /// `(1.64 − 0.29^n)^0.73`
    pub pow1: f32,
    /// Impact of surround `c`
    pub c: f32,
    /// Chromatic induction `Nc`
    pub nc: f32,
    /// Brightness factor `(4 / c) · (Aw + 4) · FL^0.25`
    pub wh: f32,
    /// `FL^0.25`
    pub pfl: f32,
    /// Von Kries gains `Yw·D / Rw + 1 − D` per CAT02 channel
    pub cone_gains: [f32; 3],
    /// White point used for the gains
    pub white: [f32; 3],
}

impl AdaptationConstants {
    /// Solves the constants for a set of viewing conditions.
    ///
    /// ```rust
    /// use locadapt_color::ciecam02::{AdaptationConstants, Surround, ViewingConditions};
    ///
    /// let white = [96.42, 100.0, 82.49];
    /// let vc = ViewingConditions::new(white, 18.0, 400.0, Surround::Average).unwrap();
    /// let k = AdaptationConstants::new(&vc);
    /// assert!((k.n - 0.18).abs() < 1e-6);
    /// assert!(k.d > 0.9 && k.d <= 1.0);
    /// ```
    pub fn new(vc: &ViewingConditions) -> Self {
        let la = vc.adapting_luminance as f64;
        let [xw, yw, zw] = vc.whitepoint_xyz;
        let SurroundFactors { f, c, nc } = vc.surround;

        let n = vc.background_luminance as f64 / yw;
        let d = match vc.degree_of_adaptation {
            Some(d) => d as f64,
            None => (f as f64 * (1.0 - (1.0 / 3.6) * ((-la - 42.0) / 92.0).exp())).clamp(0.0, 1.0),
        };

        let k = 1.0 / (5.0 * la + 1.0);
        let k4 = k * k * k * k;
        let fl = 0.2 * k4 * (5.0 * la) + 0.1 * (1.0 - k4).powi(2) * (5.0 * la).cbrt();

        let nbb = 0.725 * (1.0 / n).powf(0.2);
        let cz = 1.48 + n.sqrt();
        let pow1 = (1.64 - 0.29f64.powf(n)).powf(0.73);

        let white = [xw as f32, yw as f32, zw as f32];
        let cone = CAT02.apply(white);
        let d32 = d as f32;
        let cone_gains = [0, 1, 2].map(|i| white[1] * d32 / cone[i] + 1.0 - d32);

        let [ra, ga, ba] = cone_response(white, cone_gains, fl as f32);
        let aw = (2.0 * ra + ga + 0.05 * ba - 0.305) * nbb as f32;
        let pfl = fl.powf(0.25) as f32;

        Self {
            n: n as f32,
            d: d32,
            nbb: nbb as f32,
            ncb: nbb as f32,
            cz: cz as f32,
            aw,
            fl: fl as f32,
            pow1: pow1 as f32,
            c,
            nc,
            wh: (4.0 / c) * (aw + 4.0) * pfl,
            pfl,
            cone_gains,
            white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d65() -> ViewingConditions {
        ViewingConditions::new([95.05, 100.0, 108.88], 20.0, 318.31, Surround::Average).unwrap()
    }

    #[test]
    fn test_textbook_constants() {
        // CIE 159:2004 worked example, La = 318.31, Yb = 20
        let k = AdaptationConstants::new(&d65());
        assert_relative_eq!(k.fl, 1.1675, epsilon = 1e-3);
        assert_relative_eq!(k.n, 0.2, epsilon = 1e-6);
        assert_relative_eq!(k.nbb, 1.0003, epsilon = 1e-3);
        assert_relative_eq!(k.cz, 1.9272, epsilon = 1e-3);
        assert_relative_eq!(k.d, 0.9944, epsilon = 1e-3);
        assert_relative_eq!(k.aw, 46.1882, epsilon = 0.1);
    }

    #[test]
    fn test_full_adaptation_gains() {
        let vc = d65().with_degree_of_adaptation(1.0).unwrap();
        let k = AdaptationConstants::new(&vc);
        let cone = CAT02.apply(k.white);
        for i in 0..3 {
            assert_relative_eq!(cone[i] * k.cone_gains[i], 100.0, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_no_adaptation_gains() {
        let vc = d65().with_degree_of_adaptation(0.0).unwrap();
        let k = AdaptationConstants::new(&vc);
        assert_eq!(k.cone_gains, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rejects_bad_conditions() {
        let white = [95.0, 100.0, 108.0];
        let avg = Surround::Average;
        assert!(ViewingConditions::new([95.0, 0.0, 108.0], 20.0, 400.0, avg).is_err());
        assert!(ViewingConditions::new(white, 0.0, 400.0, avg).is_err());
        assert!(ViewingConditions::new(white, 20.0, -1.0, avg).is_err());
        let nan_white = [f64::NAN, 100.0, 108.0];
        assert!(ViewingConditions::new(nan_white, 20.0, 400.0, Surround::Dim).is_err());
        assert!(d65().with_degree_of_adaptation(1.5).is_err());
    }

    #[test]
    fn test_surround_factors() {
        assert_eq!(Surround::default(), Surround::Average);
        assert_eq!(Surround::Dark.factors().c, 0.525);
        let dim =
            ViewingConditions::new([95.05, 100.0, 108.88], 20.0, 318.31, Surround::Dim).unwrap();
        assert!(AdaptationConstants::new(&dim).d < AdaptationConstants::new(&d65()).d);
    }
}
