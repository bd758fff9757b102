//! Forward and inverse CIECAM02, generic over [`Lane`].
//!
//! Both directions are written once and instantiated for `f32` and
//! `wide::f32x4`. Hue is carried in radians throughout.

use crate::ciecam02::viewing::AdaptationConstants;
use locadapt_math::{Lane, CAT02, CAT02_INV, CAT02_TO_HPE, HPE_INV};
use std::f32::consts::TAU;

/// Largest compressed response fed to the inverse nonlinearity.
const MAX_RESPONSE: f32 = 399.99;

/// Appearance correlates of one pixel (or one lane group).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearanceCorrelates<L> {
    /// Lightness `J`
    pub j: L,
    /// Chroma `C`
    pub c: L,
    /// Hue angle `h` in radians, `[0, 2π)`
    pub h: L,
    /// Brightness `Q`
    pub q: L,
    /// Colorfulness `M`
    pub m: L,
    /// Saturation `s`
    pub s: L,
}

// ============================================================================
// Nonlinearity
// ============================================================================

/// Post-adaptation response compression.
#[inline]
pub fn post_adaptation<L: Lane>(x: L, fl: f32) -> L {
    let p = (L::splat(fl) * x.abs() / L::splat(100.0)).pow(L::splat(0.42));
    (L::splat(400.0) * p / (L::splat(27.13) + p)).with_sign_of(x) + L::splat(0.1)
}

/// Inverse of [`post_adaptation`]. The response is capped just below the
/// asymptote at 400.
#[inline]
pub fn post_adaptation_inverse<L: Lane>(x: L, fl: f32) -> L {
    let c1 = x - L::splat(0.1);
    let m = c1.abs().min(L::splat(MAX_RESPONSE));
    let base = L::splat(27.13) * m / (L::splat(400.0) - m);
    let r = L::splat(100.0 / fl) * base.pow(L::splat(1.0 / 0.42));
    r.with_sign_of(c1)
}

/// CAT02 with per-channel gains, then HPE and compression.
#[inline]
pub(crate) fn cone_response<L: Lane>(xyz: [L; 3], gains: [f32; 3], fl: f32) -> [L; 3] {
    let rgb = CAT02.apply(xyz);
    let adapted = [0, 1, 2].map(|i| rgb[i] * L::splat(gains[i]));
    CAT02_TO_HPE.apply(adapted).map(|v| post_adaptation(v, fl))
}

#[inline]
fn eccentricity<L: Lane>(h: L, k: &AdaptationConstants) -> L {
    L::splat((12500.0 / 13.0) * k.nc * k.ncb) * ((h + L::splat(2.0)).cos() + L::splat(3.8))
}

// ============================================================================
// Forward
// ============================================================================

/// XYZ (white `Y ≈ 100`) to appearance correlates.
///
/// The achromatic response is clamped at zero, so black and near-black
/// inputs produce `J = 0` instead of a NaN.
#[inline]
pub fn xyz_to_jchqms<L: Lane>(xyz: [L; 3], k: &AdaptationConstants) -> AppearanceCorrelates<L> {
    let [ra, ga, ba] = cone_response(xyz, k.cone_gains, k.fl);

    let ca = ra - (L::splat(12.0) * ga - ba) / L::splat(11.0);
    let cb = (ra + ga - L::splat(2.0) * ba) / L::splat(9.0);

    let h = cb.atan2(ca);
    let h = L::select_lt(h, L::splat(0.0), h + L::splat(TAU), h);

    let a = ((L::splat(2.0) * ra + ga + L::splat(0.05) * ba - L::splat(0.305)) * L::splat(k.nbb))
        .max(L::splat(0.0));
    let j_root = (a / L::splat(k.aw)).pow(L::splat(k.c * k.cz * 0.5));

    let e = eccentricity(h, k);
    let t = e * (ca * ca + cb * cb).sqrt() / (ra + ga + L::splat(1.05) * ba);

    let c = t.pow(L::splat(0.9)) * j_root * L::splat(k.pow1);
    let q = L::splat(k.wh) * j_root;
    let j = L::splat(100.0) * j_root * j_root;
    let m = c * L::splat(k.pfl);
    let s = L::splat(100.0) * (m / q.max(L::splat(1e-4))).sqrt();

    AppearanceCorrelates { j, c, h, q, m, s }
}

// ============================================================================
// Inverse
// ============================================================================

/// `J`, `C`, `h` back to XYZ under another set of constants.
///
/// Uses the closed form for the opponent magnitude, which covers every hue
/// without a branch on the dominant axis.
#[inline]
pub fn jch_to_xyz<L: Lane>(j: L, c: L, h: L, k: &AdaptationConstants) -> [L; 3] {
    const P3: f32 = 21.0 / 20.0;
    const K1: f32 = (2.0 + P3) * 460.0 / 1403.0;
    const K2: f32 = (2.0 + P3) * 220.0 / 1403.0;
    const K3: f32 = 27.0 / 1403.0 - P3 * 6300.0 / 1403.0;

    let j_rel = (j / L::splat(100.0)).max(L::splat(0.0));
    let j_root = j_rel.sqrt();
    let t = (c / (j_root * L::splat(k.pow1)).max(L::splat(1e-10))).pow(L::splat(1.0 / 0.9));

    let a_resp = j_rel.pow(L::splat(1.0 / (k.c * k.cz))) * L::splat(k.aw);
    let p2 = a_resp / L::splat(k.nbb) + L::splat(0.305);

    let e = eccentricity(h, k);
    let (sin_h, cos_h) = (h.sin(), h.cos());
    let r = p2 * L::splat(K1) * t / (e + t * (L::splat(K2) * cos_h - L::splat(K3) * sin_h));
    let a = r * cos_h;
    let b = r * sin_h;

    let d = L::splat(1403.0);
    let p460 = L::splat(460.0) * p2;
    let rgb_a = [
        (p460 + L::splat(451.0) * a + L::splat(288.0) * b) / d,
        (p460 - L::splat(891.0) * a - L::splat(261.0) * b) / d,
        (p460 - L::splat(220.0) * a - L::splat(6300.0) * b) / d,
    ];

    let rgb_p = rgb_a.map(|v| post_adaptation_inverse(v, k.fl));
    let cat = CAT02.apply(HPE_INV.apply(rgb_p));
    let unadapted = [0, 1, 2].map(|i| cat[i] / L::splat(k.cone_gains[i]));
    CAT02_INV.apply(unadapted)
}
