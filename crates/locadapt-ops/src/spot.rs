//! Reference color of the zone center.
//!
//! A square spot with the same area as a disc of radius `circrad` is
//! averaged around the zone center. The result feeds hue/chroma/luma
//! sensitivity controls.

use locadapt_color::LAB_SCALE;
use locadapt_core::LabImage;

/// `sqrt(π / 4)`: half side of the square with the area of a unit disc.
const DISC_TO_SQUARE: f32 = 0.88623;

/// Mean color of the spot, in Lab units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotReference {
    /// Hue of the mean a/b, radians in `(−π, π]`
    pub hue: f32,
    /// Mean chroma `√(a² + b²)`
    pub chroma: f32,
    /// Mean lightness
    pub luma: f32,
}

/// Half size in pixels of the sampling square.
pub fn spot_half_size(circrad: i32, skip: u32) -> i64 {
    let scaled = circrad / skip.max(1) as i32;
    (DISC_TO_SQUARE * scaled.max(1) as f32) as i64
}

/// Averages the spot around `center` (frame coordinates) on a Lab tile
/// placed at `origin`.
///
/// Returns `None` when the spot does not overlap the tile.
pub fn spot_reference(
    lab: &LabImage,
    center: (f32, f32),
    circrad: i32,
    origin: (u32, u32),
    skip: u32,
) -> Option<SpotReference> {
    let half = spot_half_size(circrad, skip);
    let (ox, oy) = (origin.0 as i64, origin.1 as i64);
    let (cx, cy) = center;

    let y0 = oy.max((cy - half as f32) as i64);
    let y1 = (lab.height() as i64 + oy).min((cy + half as f32 + 1.0) as i64);
    let x0 = ox.max((cx - half as f32) as i64);
    let x1 = (lab.width() as i64 + ox).min((cx + half as f32 + 1.0) as i64);
    if y1 <= y0 || x1 <= x0 {
        return None;
    }

    let (mut sum_l, mut sum_a, mut sum_b, mut sum_c) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for y in y0..y1 {
        for x in x0..x1 {
            let [l, a, b] = lab.pixel((x - ox) as u32, (y - oy) as u32);
            sum_l += l as f64;
            sum_a += a as f64;
            sum_b += b as f64;
            sum_c += (a * a + b * b).sqrt() as f64;
        }
    }

    let n = ((y1 - y0) * (x1 - x0)) as f64;
    let scale = LAB_SCALE as f64;
    let mean_a = (sum_a / n / scale) as f32;
    let mean_b = (sum_b / n / scale) as f32;
    Some(SpotReference {
        hue: mean_b.atan2(mean_a),
        chroma: (sum_c / n / scale) as f32,
        luma: (sum_l / n / scale) as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_size() {
        assert_eq!(spot_half_size(18, 1), 15);
        assert_eq!(spot_half_size(18, 4), 3);
        assert_eq!(spot_half_size(2, 8), 0);
        assert_eq!(spot_half_size(18, 0), 15);
    }

    #[test]
    fn test_uniform_patch() {
        let lab = LabImage::filled(64, 64, [50.0 * LAB_SCALE, 0.0, 20.0 * LAB_SCALE]);
        let r = spot_reference(&lab, (32.0, 32.0), 18, (0, 0), 1).unwrap();
        assert_relative_eq!(r.luma, 50.0, epsilon = 1e-3);
        assert_relative_eq!(r.chroma, 20.0, epsilon = 1e-3);
        assert_relative_eq!(r.hue, std::f32::consts::FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn test_spot_clipped_to_tile() {
        // left half red-ish, right half green-ish; a spot on the tile edge
        // only sees the pixels that exist
        let mut lab = LabImage::new(20, 20);
        for y in 0..20 {
            for x in 0..20 {
                let a = if x < 10 { 30.0 } else { -30.0 };
                lab.set_pixel(x, y, [60.0 * LAB_SCALE, a * LAB_SCALE, 0.0]);
            }
        }
        let r = spot_reference(&lab, (0.0, 10.0), 8, (0, 0), 1).unwrap();
        assert_relative_eq!(r.hue, 0.0, epsilon = 1e-4);
        assert_relative_eq!(r.chroma, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tile_origin() {
        let lab = LabImage::filled(10, 10, [40.0 * LAB_SCALE, 5.0 * LAB_SCALE, 5.0 * LAB_SCALE]);
        assert!(spot_reference(&lab, (105.0, 105.0), 8, (100, 100), 1).is_some());
        assert!(spot_reference(&lab, (5.0, 5.0), 8, (100, 100), 1).is_none());
    }
}
