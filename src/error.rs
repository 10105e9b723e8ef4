//! Errors returned by the checked entry points.
//!
//! The kernels themselves never fail: shapes are a precondition. These errors
//! only come out of [`ConvShape::infer`](crate::ConvShape::infer),
//! [`ConvShape::check_buffers`](crate::ConvShape::check_buffers) and
//! [`try_depthwise_conv`](crate::try_depthwise_conv), plus the parse error
//! for backend names.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{what} must be non-zero")]
    ZeroDimension { what: &'static str },

    #[error("stride must be non-zero")]
    ZeroStride,

    #[error("{filter_size}x{filter_size} window does not fit in a {height}x{width} input")]
    WindowTooLarge {
        filter_size: usize,
        height: usize,
        width: usize,
    },

    #[error(
        "output channels ({output_channels}) must be a multiple of input channels ({input_channels})"
    )]
    ChannelMismatch {
        input_channels: usize,
        output_channels: usize,
    },

    #[error(
        "{output_height}x{output_width} output needs more than a {input_height}x{input_width} input \
         with a {filter_size}x{filter_size} window and stride {stride}"
    )]
    OutputTooLarge {
        input_height: usize,
        input_width: usize,
        output_height: usize,
        output_width: usize,
        filter_size: usize,
        stride: usize,
    },

    #[error("{what}: expected at least {expected} elements, got {actual}")]
    BufferTooSmall {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} size overflows usize")]
    SizeOverflow { what: &'static str },
}

/// A `DEPTHWISE_BACKEND` value that names no backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend `{0}` (expected scalar, sse or neon)")]
pub struct UnknownBackend(pub String);
