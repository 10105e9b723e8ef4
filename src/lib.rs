//! Depthwise convolution kernels in Rust, built from scratch.
//!
//! I wrote this to see what it takes to make the 3×3 and 4×4 depthwise
//! convolutions in MobileNet-style networks fast on a plain CPU. Turns out
//! it's mostly about loads: each input row is loaded once per group of four
//! outputs and the shifted windows every filter tap needs are cut out of the
//! registers with lane shifts (or deinterleaved for stride 2).
//!
//! ## Usage
//!
//! ```
//! use dwconv::{ConvShape, KernelShape, depthwise_conv};
//!
//! // one 6×6 channel, 3×3 filter, stride 1
//! let shape = ConvShape::infer(1, 6, 6, 1, 3, 1).unwrap();
//! let input = vec![1.0f32; 36];
//! let filter = vec![1.0f32; 9];
//! let mut output = vec![0.0f32; shape.output_len()];
//!
//! depthwise_conv(KernelShape::K3S1, &input, &filter, &shape, &mut output);
//! assert!(output.iter().all(|&v| v == 9.0));
//! ```
//!
//! Pad first when the windows need a halo:
//!
//! ```
//! use dwconv::{PadShape, pad_f32};
//!
//! let shape = PadShape { channels: 1, input_height: 2, input_width: 2, padding_height: 1, padding_width: 1 };
//! let src = vec![5.0f32; 4];
//! let mut dest = vec![-1.0f32; shape.output_len()];
//!
//! pad_f32(&src, &mut dest, &shape);
//! assert_eq!(dest[5], 5.0);
//! assert_eq!(dest[0], 0.0);
//! ```
//!
//! ## What's inside
//!
//! - 3×3 and 4×4 kernels, stride 1 and 2
//! - SSE (x86_64) and NEON (aarch64) lanes, plus a portable fallback
//! - Zero padding with a vectorized interior copy
//! - A naive reference for every other filter shape
//!
//! Buffers are always caller-owned. Nothing here allocates, and the input and
//! output of one call can't alias.

pub mod backend;
pub mod error;
pub mod kernels;
pub mod lanes;
pub mod padding;
pub mod reference;
pub mod shape;

pub use backend::Backend;
pub use error::ShapeError;
pub use padding::pad;
pub use reference::naive::depthwise_conv_naive;
pub use shape::{ConvShape, KernelShape, PadShape};

use lanes::scalar::ScalarLanes;

/// Depthwise convolution with one of the specialized kernels.
///
/// Runs on [`Backend::active`]. Output channel `c` is the correlation of input
/// channel `c / shape.filter_multiplier` with the `c`-th filter block, and
/// `output` is fully overwritten.
///
/// # Panics
///
/// Panics if the slice sizes don't match `shape`, the output doesn't fit
/// the input for this kernel's window, or a tensor size overflows `usize`.
pub fn depthwise_conv(
    kernel: KernelShape,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) {
    depthwise_conv_with(Backend::active(), kernel, input, filter, shape, output);
}

/// Same as [`depthwise_conv`] but on an explicit backend.
///
/// # Panics
///
/// Also panics if `backend` can't run on this CPU.
pub fn depthwise_conv_with(
    backend: Backend,
    kernel: KernelShape,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) {
    assert!(backend.is_available(), "{backend} backend is not available on this CPU");
    shape.assert_buffers(kernel.filter_size(), kernel.stride(), input, filter, output);

    // SAFETY: buffer sizes and window coverage were checked above, and the
    // backend runs on this CPU.
    unsafe { run_on(backend, kernel, input, filter, shape, output) }
}

/// Depthwise convolution for any filter size and stride.
///
/// Uses a specialized kernel when there is one and the naive reference
/// otherwise.
///
/// # Panics
///
/// Panics if the slice sizes don't match `shape`.
pub fn depthwise_conv_any(
    filter_size: usize,
    stride: usize,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) {
    match KernelShape::from_geometry(filter_size, stride) {
        Some(kernel) => depthwise_conv(kernel, input, filter, shape, output),
        None => {
            log::trace!("no {filter_size}x{filter_size}/s{stride} kernel, using the naive path");
            shape.assert_buffers(filter_size, stride, input, filter, output);
            depthwise_conv_naive(input, filter, shape, filter_size, stride, output);
        }
    }
}

/// Checked form of [`depthwise_conv_any`]: returns an error instead of
/// panicking when the buffers don't match `shape` or its sizes overflow.
pub fn try_depthwise_conv(
    filter_size: usize,
    stride: usize,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) -> Result<(), ShapeError> {
    if filter_size == 0 {
        return Err(ShapeError::ZeroDimension {
            what: "filter size",
        });
    }
    shape.check_buffers(filter_size, stride, input.len(), filter.len(), output.len())?;
    depthwise_conv_any(filter_size, stride, input, filter, shape, output);
    Ok(())
}

/// Zero padding for `f32`, copying interiors through the active backend.
///
/// # Panics
///
/// Panics if `src` or `dest` is shorter than `shape` requires, or if the
/// padded size overflows `usize`.
pub fn pad_f32(src: &[f32], dest: &mut [f32], shape: &PadShape) {
    pad_f32_with(Backend::active(), src, dest, shape);
}

/// Same as [`pad_f32`] on an explicit backend.
pub fn pad_f32_with(backend: Backend, src: &[f32], dest: &mut [f32], shape: &PadShape) {
    assert!(backend.is_available(), "{backend} backend is not available on this CPU");
    shape.assert_buffers(src, dest);

    // SAFETY: sizes fit in usize and lengths were checked above, backend
    // available.
    unsafe {
        match backend {
            Backend::Scalar => padding::pad_with_lanes::<ScalarLanes>(src, dest, shape),
            #[cfg(target_arch = "x86_64")]
            Backend::Sse => padding::pad_with_lanes::<lanes::sse::SseLanes>(src, dest, shape),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => padding::pad_with_lanes::<lanes::neon::NeonLanes>(src, dest, shape),
            _ => unreachable!("{backend} backend is not compiled for this target"),
        }
    }
}

/// # Safety
///
/// `backend` must be available and the buffers must satisfy
/// [`ConvShape::check_buffers`] for `kernel`.
unsafe fn run_on(
    backend: Backend,
    kernel: KernelShape,
    input: &[f32],
    filter: &[f32],
    shape: &ConvShape,
    output: &mut [f32],
) {
    unsafe {
        match backend {
            Backend::Scalar => kernels::run::<ScalarLanes>(kernel, input, filter, shape, output),
            #[cfg(target_arch = "x86_64")]
            Backend::Sse => kernels::run::<lanes::sse::SseLanes>(kernel, input, filter, shape, output),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => {
                kernels::run::<lanes::neon::NeonLanes>(kernel, input, filter, shape, output)
            }
            _ => unreachable!("{backend} backend is not compiled for this target"),
        }
    }
}
