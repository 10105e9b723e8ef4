//! Depthwise convolution kernels for the small fixed filter shapes.
//!
//! Each kernel computes four outputs of a row per step. It loads one or two
//! registers per input row and derives the shifted windows the filter taps
//! need from those registers instead of reloading them, then finishes the
//! row's leftover columns with the scalar helpers in `window`.
//!
//! Available kernels:
//! - `conv3x3s1`: 3×3, stride 1 (lane shifts 1, 2)
//! - `conv3x3s2`: 3×3, stride 2 (deinterleave + one extra load)
//! - `conv4x4s1`: 4×4, stride 1 (lane shifts 1, 2, 3)
//! - `conv4x4s2`: 4×4, stride 2 (two deinterleaving loads)

pub mod conv3x3s1;
pub mod conv3x3s2;
pub mod conv4x4s1;
pub mod conv4x4s2;
pub mod window;

use crate::lanes::{Lanes, WIDTH, accumulate, splat_taps};
use crate::shape::{ConvShape, KernelShape};

/// Runs the kernel for `kernel` with lane type `L`.
///
/// # Safety
///
/// Same contract as the individual kernels, and `L` must be usable on the
/// running CPU.
pub unsafe fn run<L: Lanes>(
    kernel: KernelShape,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) {
    unsafe {
        match kernel {
            KernelShape::K3S1 => conv3x3s1::conv3x3s1::<L>(input, filter, shape, output),
            KernelShape::K3S2 => conv3x3s2::conv3x3s2::<L>(input, filter, shape, output),
            KernelShape::K4S1 => conv4x4s1::conv4x4s1::<L>(input, filter, shape, output),
            KernelShape::K4S2 => conv4x4s2::conv4x4s2::<L>(input, filter, shape, output),
        }
    }
}

/// Row loop shared by the kernels.
///
/// `load_row` turns a pointer to the first input column of a group into the
/// `FS` shifted windows of that input row; it is the only part that differs
/// between kernels. A group reads `span` elements from that pointer.
///
/// Output is written strictly in order, channel by channel and row by row.
#[inline(always)]
unsafe fn depthwise_rows<L, const FS: usize, const TAPS: usize, const STRIDE: usize>(
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
    span: usize,
    load_row: impl Fn(*const f32) -> [L; FS],
) where
    L: Lanes,
{
    debug_assert_eq!(FS * FS, TAPS);
    debug_assert!(
        shape
            .check_buffers(FS, STRIDE, input.len(), filter.len(), output.len())
            .is_ok()
    );

    let width = shape.input_width;
    let plane = shape.input_height * width;
    let groups = shape.output_width / WIDTH;
    let out_len = output.len();
    let src = input.as_ptr();
    let dst = output.as_mut_ptr();
    let mut out = 0;

    for (c, coeffs) in filter
        .chunks_exact(TAPS)
        .take(shape.output_channels)
        .enumerate()
    {
        // Resident for the whole channel
        let taps: [L; TAPS] = unsafe { splat_taps(coeffs) };
        let start = (c / shape.filter_multiplier) * plane;

        for h in 0..shape.output_height {
            let rows: [usize; FS] = std::array::from_fn(|i| start + (STRIDE * h + i) * width);
            let bulk = window::vector_groups(input.len(), rows[FS - 1], groups, STRIDE * WIDTH, span);

            for s in 0..bulk {
                let col = s * STRIDE * WIDTH;
                let mut windows = [unsafe { L::zero() }; TAPS];
                for (i, &row) in rows.iter().enumerate() {
                    let row_windows = load_row(unsafe { src.add(row + col) });
                    windows[i * FS..(i + 1) * FS].copy_from_slice(&row_windows);
                }
                debug_assert!(out + WIDTH <= out_len);
                unsafe { accumulate(&windows, &taps).store(dst.add(out)) };
                out += WIDTH;
            }

            for w in bulk * WIDTH..shape.output_width {
                debug_assert!(out < out_len);
                unsafe { *dst.add(out) = window::dot(input, &rows, STRIDE * w, coeffs) };
                out += 1;
            }
        }
    }
}
