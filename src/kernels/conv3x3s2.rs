//! 3×3 stride-2 depthwise kernel.

use super::depthwise_rows;
use crate::lanes::{Lanes, WIDTH};
use crate::shape::ConvShape;

/// Each step calculates four elements of an output row:
///
/// ```text
///   R0[0, 2, 4, 6] * K[0][0]
///   R0[1, 3, 5, 7] * K[0][1]
///   R0[2, 4, 6, 8] * K[0][2]
///   ...
/// + R2[2, 4, 6, 8] * K[2][2]
/// --------------------------
///     Out[0, 1, 2, 3]
/// ```
///
/// A deinterleaving load of `R[0..8]` gives the even and odd columns; the
/// third window is the even stream shifted by one against `R[8..12]`.
///
/// # Safety
///
/// - `input.len() >= shape.input_len()`
/// - `filter.len() >= shape.output_channels * 9`
/// - `output.len() >= shape.output_len()`
/// - `shape.covers(3, 2)` and `shape.filter_multiplier > 0`
pub unsafe fn conv3x3s2<L: Lanes>(input: &[f32], filter: &[f32], shape: &ConvShape, output: &mut [f32]) {
    let load_row = |r: *const f32| unsafe {
        let (even, odd) = L::load_deinterleaved(r);
        let next = L::load(r.add(2 * WIDTH));
        [even, odd, L::ext1(even, next)]
    };
    unsafe { depthwise_rows::<L, 3, 9, 2>(input, filter, shape, output, 3 * WIDTH, load_row) }
}
