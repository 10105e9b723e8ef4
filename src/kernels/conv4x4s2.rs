//! 4×4 stride-2 depthwise kernel.

use super::depthwise_rows;
use crate::lanes::{Lanes, WIDTH};
use crate::shape::ConvShape;

/// Each step calculates four elements of an output row:
///
/// ```text
///   R[0, 2, 4, 6] * K[i][0]
///   R[1, 3, 5, 7] * K[i][1]
///   R[2, 4, 6, 8] * K[i][2]
///   R[3, 5, 7, 9] * K[i][3]
/// ```
///
/// Two deinterleaving loads (`R[0..8]` and `R[8..16]`) per input row; taps 2
/// and 3 are the even and odd streams shifted by one lane.
///
/// # Safety
///
/// - `input.len() >= shape.input_len()`
/// - `filter.len() >= shape.output_channels * 16`
/// - `output.len() >= shape.output_len()`
/// - `shape.covers(4, 2)` and `shape.filter_multiplier > 0`
pub unsafe fn conv4x4s2<L: Lanes>(input: &[f32], filter: &[f32], shape: &ConvShape, output: &mut [f32]) {
    let load_row = |r: *const f32| unsafe {
        let (even, odd) = L::load_deinterleaved(r);
        let (next_even, next_odd) = L::load_deinterleaved(r.add(2 * WIDTH));
        [even, odd, L::ext1(even, next_even), L::ext1(odd, next_odd)]
    };
    unsafe { depthwise_rows::<L, 4, 16, 2>(input, filter, shape, output, 4 * WIDTH, load_row) }
}
