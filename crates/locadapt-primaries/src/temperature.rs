//! Correlated color temperature to white point.
//!
//! At and above 4000 K the white follows the CIE daylight locus; below it
//! follows the Planckian (black body) locus through the Kim et al. cubic
//! spline. Temperatures are clamped to the range both fits are valid for.

/// Lowest supported temperature in kelvin.
pub const MIN_TEMPERATURE: f64 = 1667.0;

/// Highest supported temperature in kelvin.
pub const MAX_TEMPERATURE: f64 = 25000.0;

/// Below this the Planckian locus is used instead of daylight.
pub const DAYLIGHT_THRESHOLD: f64 = 4000.0;

/// CIE xy chromaticity of a correlated color temperature.
///
/// ```rust
/// use locadapt_primaries::temperature_to_xy;
///
/// let (x, y) = temperature_to_xy(6504.0);
/// assert!((x - 0.3127).abs() < 1e-3 && (y - 0.3291).abs() < 1e-3);
/// ```
pub fn temperature_to_xy(kelvin: f64) -> (f64, f64) {
    let t = kelvin.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
    let t2 = t * t;
    let t3 = t2 * t;

    if t >= DAYLIGHT_THRESHOLD {
        let x = if t <= 7000.0 {
            -4.6070e9 / t3 + 2.9678e6 / t2 + 0.09911e3 / t + 0.244063
        } else {
            -2.0064e9 / t3 + 1.9018e6 / t2 + 0.24748e3 / t + 0.237040
        };
        let y = -3.0 * x * x + 2.87 * x - 0.275;
        return (x, y);
    }

    let x = -0.2661239e9 / t3 - 0.2343589e6 / t2 + 0.8776956e3 / t + 0.179910;
    let x2 = x * x;
    let x3 = x2 * x;
    let y = if t <= 2222.0 {
        -1.1063814 * x3 - 1.34811020 * x2 + 2.18555832 * x - 0.20219683
    } else {
        -0.9549476 * x3 - 1.37418593 * x2 + 2.09137015 * x - 0.16748867
    };
    (x, y)
}

/// White point of a correlated color temperature as XYZ with `Y = 1`.
pub fn temperature_to_white(kelvin: f64) -> [f64; 3] {
    let (x, y) = temperature_to_xy(kelvin);
    [x / y, 1.0, (1.0 - x - y) / y]
}
