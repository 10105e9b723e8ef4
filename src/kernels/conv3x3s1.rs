//! 3×3 stride-1 depthwise kernel.

use super::depthwise_rows;
use crate::lanes::{Lanes, WIDTH};
use crate::shape::ConvShape;

/// Each step calculates four elements of an output row:
///
/// ```text
///   R0[0, 1, 2, 3] * K[0][0]
///   R0[1, 2, 3, 4] * K[0][1]
///   R0[2, 3, 4, 5] * K[0][2]
///   R1[0, 1, 2, 3] * K[1][0]
///   ...
/// + R2[2, 3, 4, 5] * K[2][2]
/// --------------------------
///     Out[0, 1, 2, 3]
/// ```
///
/// Per input row, `R[0..4]` and `R[4..8]` are loaded once and the two
/// shifted windows are cut out of the pair with lane shifts.
///
/// # Safety
///
/// - `input.len() >= shape.input_len()`
/// - `filter.len() >= shape.output_channels * 9`
/// - `output.len() >= shape.output_len()`
/// - `shape.covers(3, 1)` and `shape.filter_multiplier > 0`
pub unsafe fn conv3x3s1<L: Lanes>(input: &[f32], filter: &[f32], shape: &ConvShape, output: &mut [f32]) {
    let load_row = |r: *const f32| unsafe {
        let r0 = L::load(r);
        let r1 = L::load(r.add(WIDTH));
        [r0, L::ext1(r0, r1), L::ext2(r0, r1)]
    };
    unsafe { depthwise_rows::<L, 3, 9, 1>(input, filter, shape, output, 2 * WIDTH, load_row) }
}
