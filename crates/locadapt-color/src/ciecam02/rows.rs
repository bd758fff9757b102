//! Row batches over the generic transform.
//!
//! Rows are processed in groups of four with `f32x4` and the remainder with
//! the scalar lane. The `_scalar` variants run the whole row through `f32`
//! and exist for comparison and benchmarking.

use crate::ciecam02::transform::{jch_to_xyz, xyz_to_jchqms};
use crate::ciecam02::viewing::AdaptationConstants;
use crate::convert::{lab_to_xyz, xyz_to_lab, CAM_SCALE};
use locadapt_core::CHANNELS;
use locadapt_math::Lane;
use wide::f32x4;

/// Planar XYZ line buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzRows {
    /// X plane
    pub x: Vec<f32>,
    /// Y plane
    pub y: Vec<f32>,
    /// Z plane
    pub z: Vec<f32>,
}

impl XyzRows {
    /// Zeroed buffer of `len` samples.
    pub fn with_len(len: usize) -> Self {
        Self { x: vec![0.0; len], y: vec![0.0; len], z: vec![0.0; len] }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Planar `J`, `C`, `h` line buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelateRows {
    /// Lightness
    pub j: Vec<f32>,
    /// Chroma
    pub c: Vec<f32>,
    /// Hue in radians
    pub h: Vec<f32>,
}

impl CorrelateRows {
    /// Zeroed buffer of `len` samples.
    pub fn with_len(len: usize) -> Self {
        Self { j: vec![0.0; len], c: vec![0.0; len], h: vec![0.0; len] }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.j.len()
    }

    /// True when the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.j.is_empty()
    }
}

fn forward_span<L: Lane>(
    src: &XyzRows,
    k: &AdaptationConstants,
    out: &mut CorrelateRows,
    start: usize,
    end: usize,
) {
    for i in (start..end).step_by(L::WIDTH) {
        let xyz = [L::load(&src.x[i..]), L::load(&src.y[i..]), L::load(&src.z[i..])];
        let v = xyz_to_jchqms(xyz, k);
        v.j.store(&mut out.j[i..]);
        v.c.store(&mut out.c[i..]);
        v.h.store(&mut out.h[i..]);
    }
}

fn inverse_span<L: Lane>(
    src: &CorrelateRows,
    k: &AdaptationConstants,
    out: &mut XyzRows,
    start: usize,
    end: usize,
) {
    for i in (start..end).step_by(L::WIDTH) {
        let (j, c, h) = (L::load(&src.j[i..]), L::load(&src.c[i..]), L::load(&src.h[i..]));
        let [x, y, z] = jch_to_xyz(j, c, h, k);
        x.store(&mut out.x[i..]);
        y.store(&mut out.y[i..]);
        z.store(&mut out.z[i..]);
    }
}

#[inline]
fn vector_split(len: usize) -> usize {
    len - len % <f32x4 as Lane>::WIDTH
}

/// Forward transform of a planar row. Processes `min(src.len(), out.len())`
/// samples.
pub fn forward_row(src: &XyzRows, k: &AdaptationConstants, out: &mut CorrelateRows) {
    let n = src.len().min(out.len());
    let split = vector_split(n);
    forward_span::<f32x4>(src, k, out, 0, split);
    forward_span::<f32>(src, k, out, split, n);
}

/// Inverse transform of a planar row.
pub fn inverse_row(src: &CorrelateRows, k: &AdaptationConstants, out: &mut XyzRows) {
    let n = src.len().min(out.len());
    let split = vector_split(n);
    inverse_span::<f32x4>(src, k, out, 0, split);
    inverse_span::<f32>(src, k, out, split, n);
}

/// [`forward_row`] on the scalar lane only.
pub fn forward_row_scalar(src: &XyzRows, k: &AdaptationConstants, out: &mut CorrelateRows) {
    let n = src.len().min(out.len());
    forward_span::<f32>(src, k, out, 0, n);
}

/// [`inverse_row`] on the scalar lane only.
pub fn inverse_row_scalar(src: &CorrelateRows, k: &AdaptationConstants, out: &mut XyzRows) {
    let n = src.len().min(out.len());
    inverse_span::<f32>(src, k, out, 0, n);
}

// ============================================================================
// Adapter
// ============================================================================

/// Scene-to-destination adaptation through the appearance space.
///
/// Holds the two constant sets of one run. Lab rows in the scaled domain go
/// through XYZ, forward under the scene conditions, inverse under the
/// destination conditions, and back to Lab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaticAdapter {
    scene: AdaptationConstants,
    destination: AdaptationConstants,
}

impl ChromaticAdapter {
    /// Creates an adapter from solved constants.
    pub fn new(scene: AdaptationConstants, destination: AdaptationConstants) -> Self {
        Self { scene, destination }
    }

    /// Scene constants.
    pub fn scene(&self) -> &AdaptationConstants {
        &self.scene
    }

    /// Destination constants.
    pub fn destination(&self) -> &AdaptationConstants {
        &self.destination
    }

    /// Adapts one XYZ value with white `Y ≈ 100`.
    pub fn adapt_xyz(&self, xyz: [f32; 3]) -> [f32; 3] {
        let v = xyz_to_jchqms(xyz, &self.scene);
        jch_to_xyz(v.j, v.c, v.h, &self.destination)
    }

    /// Adapts an interleaved scaled-Lab row into `dst`.
    ///
    /// Both slices hold `CHANNELS` values per pixel; the shorter one bounds
    /// the work. Line buffers are allocated per call.
    pub fn adapt_lab_row(&self, src: &[f32], dst: &mut [f32]) {
        self.adapt_lab_row_with(src, dst, forward_row, inverse_row);
    }

    /// [`adapt_lab_row`](Self::adapt_lab_row) on the scalar lane only.
    pub fn adapt_lab_row_scalar(&self, src: &[f32], dst: &mut [f32]) {
        self.adapt_lab_row_with(src, dst, forward_row_scalar, inverse_row_scalar);
    }

    fn adapt_lab_row_with(
        &self,
        src: &[f32],
        dst: &mut [f32],
        forward: fn(&XyzRows, &AdaptationConstants, &mut CorrelateRows),
        inverse: fn(&CorrelateRows, &AdaptationConstants, &mut XyzRows),
    ) {
        let n = src.len().min(dst.len()) / CHANNELS;
        let mut xyz = XyzRows::with_len(n);
        for (i, lab) in src.chunks_exact(CHANNELS).take(n).enumerate() {
            let [x, y, z] = lab_to_xyz([lab[0], lab[1], lab[2]]);
            xyz.x[i] = x / CAM_SCALE;
            xyz.y[i] = y / CAM_SCALE;
            xyz.z[i] = z / CAM_SCALE;
        }

        let mut jch = CorrelateRows::with_len(n);
        forward(&xyz, &self.scene, &mut jch);
        inverse(&jch, &self.destination, &mut xyz);

        for (i, out) in dst.chunks_exact_mut(CHANNELS).take(n).enumerate() {
            let scaled = [xyz.x[i] * CAM_SCALE, xyz.y[i] * CAM_SCALE, xyz.z[i] * CAM_SCALE];
            let lab = xyz_to_lab(scaled);
            out.copy_from_slice(&lab);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciecam02::viewing::{Surround, ViewingConditions};
    use approx::assert_relative_eq;

    fn constants(white: [f64; 3], d: f32) -> AdaptationConstants {
        let vc = ViewingConditions::new(white, 18.0, 400.0, Surround::Average)
            .unwrap()
            .with_degree_of_adaptation(d)
            .unwrap();
        AdaptationConstants::new(&vc)
    }

    fn sample_row(len: usize) -> XyzRows {
        let mut rows = XyzRows::with_len(len);
        for i in 0..len {
            let t = i as f32 / len as f32;
            rows.x[i] = 5.0 + 80.0 * t;
            rows.y[i] = 4.0 + 90.0 * t * t;
            rows.z[i] = 60.0 - 50.0 * t;
        }
        rows
    }

    #[test]
    fn test_row_vector_matches_scalar() {
        // 7 samples: one vector group plus a scalar tail
        let k = constants([96.42, 100.0, 82.49], 0.9);
        let src = sample_row(7);
        let mut vec_out = CorrelateRows::with_len(7);
        let mut scalar_out = CorrelateRows::with_len(7);
        forward_row(&src, &k, &mut vec_out);
        forward_row_scalar(&src, &k, &mut scalar_out);
        for i in 0..7 {
            assert_relative_eq!(vec_out.j[i], scalar_out.j[i], max_relative = 1e-4);
            assert_relative_eq!(vec_out.c[i], scalar_out.c[i], max_relative = 1e-3, epsilon = 1e-3);
            assert_relative_eq!(vec_out.h[i], scalar_out.h[i], epsilon = 1e-3);
        }
    }

    #[test]
    fn test_row_round_trip() {
        let k = constants([96.42, 100.0, 82.49], 0.7);
        let src = sample_row(9);
        let mut jch = CorrelateRows::with_len(9);
        let mut back = XyzRows::with_len(9);
        forward_row(&src, &k, &mut jch);
        inverse_row(&jch, &k, &mut back);
        for i in 0..9 {
            assert_relative_eq!(back.y[i], src.y[i], max_relative = 1e-3);
            assert_relative_eq!(back.x[i], src.x[i], max_relative = 1e-3);
        }
    }

    #[test]
    fn test_identity_adapter_preserves_lab() {
        let k = constants([96.42, 100.0, 82.49], 0.5);
        let adapter = ChromaticAdapter::new(k, k);
        let src = [
            16000.0, 1200.0, -800.0, //
            24000.0, -3000.0, 4000.0, //
            8000.0, 500.0, 500.0, //
            30000.0, 0.0, 0.0, //
            12000.0, 2000.0, -2500.0,
        ];
        let mut dst = [0.0f32; 15];
        adapter.adapt_lab_row(&src, &mut dst);
        for (a, b) in src.iter().zip(dst.iter()) {
            assert!((a - b).abs() < 15.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_warmer_destination_shifts_b() {
        // grey under a D50-ish scene moved to a 3000 K-ish destination
        let scene = constants([96.42, 100.0, 82.49], 0.9);
        let dest = constants([109.85, 100.0, 35.58], 0.9);
        let adapter = ChromaticAdapter::new(scene, dest);
        let grey = [16000.0f32, 0.0, 0.0];
        let mut out = [0.0f32; 3];
        adapter.adapt_lab_row(&grey, &mut out);
        assert!(out[2] > 1000.0, "b = {}", out[2]);
    }

    #[test]
    fn test_adapter_scalar_and_row_agree() {
        let scene = constants([96.42, 100.0, 82.49], 0.8);
        let dest = constants([95.05, 100.0, 108.88], 0.8);
        let adapter = ChromaticAdapter::new(scene, dest);
        let src = [
            20000.0f32, 1500.0, -1000.0, 9000.0, -400.0, 2200.0, 14000.0, 0.0, 800.0, 25000.0,
            3000.0, 3000.0,
        ];
        let mut fast = [0.0f32; 12];
        let mut slow = [0.0f32; 12];
        adapter.adapt_lab_row(&src, &mut fast);
        adapter.adapt_lab_row_scalar(&src, &mut slow);
        for (a, b) in fast.iter().zip(slow.iter()) {
            assert!((a - b).abs() < 5.0, "{a} vs {b}");
        }
    }
}
