//! 4×4 stride-1 depthwise kernel.

use super::depthwise_rows;
use crate::lanes::{Lanes, WIDTH};
use crate::shape::ConvShape;

/// Same scheme as the 3×3 stride-1 kernel with one more tap per row: the
/// windows `R[0..4]`, `R[1..5]`, `R[2..6]`, `R[3..7]` all come out of the
/// `R[0..4]`/`R[4..8]` register pair.
///
/// # Safety
///
/// - `input.len() >= shape.input_len()`
/// - `filter.len() >= shape.output_channels * 16`
/// - `output.len() >= shape.output_len()`
/// - `shape.covers(4, 1)` and `shape.filter_multiplier > 0`
pub unsafe fn conv4x4s1<L: Lanes>(input: &[f32], filter: &[f32], shape: &ConvShape, output: &mut [f32]) {
    let load_row = |r: *const f32| unsafe {
        let r0 = L::load(r);
        let r1 = L::load(r.add(WIDTH));
        [r0, L::ext1(r0, r1), L::ext2(r0, r1), L::ext3(r0, r1)]
    };
    unsafe { depthwise_rows::<L, 4, 16, 1>(input, filter, shape, output, 2 * WIDTH, load_row) }
}
