use std::ops::{Add, Mul};

use crate::shape::ConvShape;

/// Naive depthwise convolution, any filter size, any stride, any element type.
///
/// This is the textbook loop: every output element walks its full window.
/// Taps are summed sequentially in row-major order, which is not the order
/// the SIMD kernels use, so compare `f32` results with a tolerance.
///
/// Use this as a correctness baseline, or for shapes outside
/// [`KernelShape`](crate::KernelShape).
///
/// # Arguments
///
/// * `input` - `shape.input_channels()` planes of `input_height × input_width`
/// * `filter` - one `filter_size × filter_size` block per output channel
/// * `output` - `output_channels` planes of `output_height × output_width`, overwritten
///
/// # Panics
///
/// Panics if a window or buffer index falls outside the slices.
pub fn depthwise_conv_naive<T>(
    input: &[T],
    filter: &[T],
    shape: &ConvShape,
    filter_size: usize,
    stride: usize,
    output: &mut [T],
) where
    T: Copy + Default + Add<Output = T> + Mul<Output = T>,
{
    let ConvShape {
        input_height,
        input_width,
        output_channels,
        output_height,
        output_width,
        filter_multiplier,
    } = *shape;
    let taps = filter_size * filter_size;

    for c in 0..output_channels {
        let plane = &input[(c / filter_multiplier) * input_height * input_width..];
        let coeffs = &filter[c * taps..(c + 1) * taps];
        for h in 0..output_height {
            for w in 0..output_width {
                let mut sum = T::default();
                for i in 0..filter_size {
                    for j in 0..filter_size {
                        let x = plane[(h * stride + i) * input_width + w * stride + j];
                        sum = sum + x * coeffs[i * filter_size + j];
                    }
                }
                output[(c * output_height + h) * output_width + w] = sum;
            }
        }
    }
}
