//! Tensor shapes for the convolution and padding calls.

use crate::error::ShapeError;

/// Dimensions of one depthwise convolution call.
///
/// All tensors are channel-major and row-major: channel `c` of the input
/// lives at `[c * input_height * input_width, (c + 1) * input_height * input_width)`.
/// The input dimensions already include any padding the caller wants.
///
/// Output channel `c` reads input channel `c / filter_multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvShape {
    pub input_height: usize,
    pub input_width: usize,
    pub output_channels: usize,
    pub output_height: usize,
    pub output_width: usize,
    pub filter_multiplier: usize,
}

impl ConvShape {
    /// Computes the output geometry for a `filter_size`×`filter_size` window
    /// moving with `stride` over an unpadded view of the input.
    ///
    /// `output_dim = (input_dim - filter_size) / stride + 1`
    pub fn infer(
        input_channels: usize,
        input_height: usize,
        input_width: usize,
        output_channels: usize,
        filter_size: usize,
        stride: usize,
    ) -> Result<Self, ShapeError> {
        for (what, value) in [
            ("input channels", input_channels),
            ("input height", input_height),
            ("input width", input_width),
            ("output channels", output_channels),
            ("filter size", filter_size),
        ] {
            if value == 0 {
                return Err(ShapeError::ZeroDimension { what });
            }
        }
        if stride == 0 {
            return Err(ShapeError::ZeroStride);
        }
        if filter_size > input_height || filter_size > input_width {
            return Err(ShapeError::WindowTooLarge {
                filter_size,
                height: input_height,
                width: input_width,
            });
        }
        if output_channels % input_channels != 0 {
            return Err(ShapeError::ChannelMismatch {
                input_channels,
                output_channels,
            });
        }

        let shape = Self {
            input_height,
            input_width,
            output_channels,
            output_height: (input_height - filter_size) / stride + 1,
            output_width: (input_width - filter_size) / stride + 1,
            filter_multiplier: output_channels / input_channels,
        };
        shape.try_input_len()?;
        shape.try_filter_len(filter_size)?;
        shape.try_output_len()?;
        Ok(shape)
    }

    pub fn input_channels(&self) -> usize {
        self.output_channels / self.filter_multiplier
    }

    /// Element count of the input tensor, or `SizeOverflow` if it doesn't fit
    /// in a `usize`.
    pub fn try_input_len(&self) -> Result<usize, ShapeError> {
        product("input", &[self.input_channels(), self.input_height, self.input_width])
    }

    pub fn try_filter_len(&self, filter_size: usize) -> Result<usize, ShapeError> {
        product("filter", &[self.output_channels, filter_size, filter_size])
    }

    pub fn try_output_len(&self) -> Result<usize, ShapeError> {
        product("output", &[self.output_channels, self.output_height, self.output_width])
    }

    /// # Panics
    ///
    /// Panics if the size overflows `usize`. Same for the other `*_len`.
    pub fn input_len(&self) -> usize {
        self.try_input_len().unwrap_or_else(|e| panic!("depthwise conv: {e}"))
    }

    pub fn filter_len(&self, filter_size: usize) -> usize {
        self.try_filter_len(filter_size)
            .unwrap_or_else(|e| panic!("depthwise conv: {e}"))
    }

    pub fn output_len(&self) -> usize {
        self.try_output_len().unwrap_or_else(|e| panic!("depthwise conv: {e}"))
    }

    /// True when every window the output asks for lies inside the input.
    pub fn covers(&self, filter_size: usize, stride: usize) -> bool {
        let fits = |input: usize, output: usize| {
            output == 0
                || stride
                    .checked_mul(output - 1)
                    .and_then(|start| start.checked_add(filter_size))
                    .is_some_and(|end| end <= input)
        };
        self.filter_multiplier > 0
            && self.output_channels % self.filter_multiplier == 0
            && fits(self.input_height, self.output_height)
            && fits(self.input_width, self.output_width)
    }

    /// Checks that the output fits the input for this window and that the
    /// three buffers are long enough.
    pub fn check_buffers(
        &self,
        filter_size: usize,
        stride: usize,
        input_len: usize,
        filter_len: usize,
        output_len: usize,
    ) -> Result<(), ShapeError> {
        if self.filter_multiplier == 0 {
            return Err(ShapeError::ZeroDimension {
                what: "filter multiplier",
            });
        }
        if stride == 0 {
            return Err(ShapeError::ZeroStride);
        }
        if self.output_channels % self.filter_multiplier != 0 {
            return Err(ShapeError::ChannelMismatch {
                input_channels: self.input_channels(),
                output_channels: self.output_channels,
            });
        }
        if !self.covers(filter_size, stride) {
            return Err(ShapeError::OutputTooLarge {
                input_height: self.input_height,
                input_width: self.input_width,
                output_height: self.output_height,
                output_width: self.output_width,
                filter_size,
                stride,
            });
        }
        for (what, expected, actual) in [
            ("input", self.try_input_len()?, input_len),
            ("filter", self.try_filter_len(filter_size)?, filter_len),
            ("output", self.try_output_len()?, output_len),
        ] {
            if actual < expected {
                return Err(ShapeError::BufferTooSmall {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Panicking form of [`check_buffers`](Self::check_buffers), run once per
    /// call by the unchecked entry points before they hand raw pointers to
    /// the kernels.
    pub(crate) fn assert_buffers<T>(
        &self,
        filter_size: usize,
        stride: usize,
        input: &[T],
        filter: &[T],
        output: &[T],
    ) {
        if let Err(e) =
            self.check_buffers(filter_size, stride, input.len(), filter.len(), output.len())
        {
            panic!("depthwise conv: {e}");
        }
    }
}

/// The closed set of specialized kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelShape {
    K3S1,
    K3S2,
    K4S1,
    K4S2,
}

impl KernelShape {
    pub const ALL: [KernelShape; 4] = [Self::K3S1, Self::K3S2, Self::K4S1, Self::K4S2];

    /// Returns `None` for geometries without a hand-tuned kernel.
    pub fn from_geometry(filter_size: usize, stride: usize) -> Option<Self> {
        match (filter_size, stride) {
            (3, 1) => Some(Self::K3S1),
            (3, 2) => Some(Self::K3S2),
            (4, 1) => Some(Self::K4S1),
            (4, 2) => Some(Self::K4S2),
            _ => None,
        }
    }

    pub fn filter_size(self) -> usize {
        match self {
            Self::K3S1 | Self::K3S2 => 3,
            Self::K4S1 | Self::K4S2 => 4,
        }
    }

    pub fn stride(self) -> usize {
        match self {
            Self::K3S1 | Self::K4S1 => 1,
            Self::K3S2 | Self::K4S2 => 2,
        }
    }
}

/// Dimensions of one padding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadShape {
    pub channels: usize,
    pub input_height: usize,
    pub input_width: usize,
    pub padding_height: usize,
    pub padding_width: usize,
}

impl PadShape {
    /// Padded height, or `SizeOverflow` if it doesn't fit in a `usize`.
    pub fn try_output_height(&self) -> Result<usize, ShapeError> {
        padded("padded height", self.input_height, self.padding_height)
    }

    pub fn try_output_width(&self) -> Result<usize, ShapeError> {
        padded("padded width", self.input_width, self.padding_width)
    }

    pub fn try_input_len(&self) -> Result<usize, ShapeError> {
        product("pad input", &[self.channels, self.input_height, self.input_width])
    }

    pub fn try_output_len(&self) -> Result<usize, ShapeError> {
        let height = self.try_output_height()?;
        let width = self.try_output_width()?;
        let len = product("pad output", &[self.channels, height, width])?;
        // the top and bottom halo of one channel
        product("pad halo", &[width, self.padding_height, 2])?;
        Ok(len)
    }

    /// # Panics
    ///
    /// Panics if the size overflows `usize`. Same for the other accessors.
    pub fn output_height(&self) -> usize {
        self.try_output_height().unwrap_or_else(|e| panic!("pad: {e}"))
    }

    pub fn output_width(&self) -> usize {
        self.try_output_width().unwrap_or_else(|e| panic!("pad: {e}"))
    }

    pub fn input_len(&self) -> usize {
        self.try_input_len().unwrap_or_else(|e| panic!("pad: {e}"))
    }

    pub fn output_len(&self) -> usize {
        self.try_output_len().unwrap_or_else(|e| panic!("pad: {e}"))
    }

    /// Checks that every size fits in a `usize` and both buffers are long
    /// enough.
    pub fn check_buffers(&self, src_len: usize, dest_len: usize) -> Result<(), ShapeError> {
        for (what, expected, actual) in [
            ("src", self.try_input_len()?, src_len),
            ("dest", self.try_output_len()?, dest_len),
        ] {
            if actual < expected {
                return Err(ShapeError::BufferTooSmall {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Panicking form of [`check_buffers`](Self::check_buffers).
    pub(crate) fn assert_buffers<T>(&self, src: &[T], dest: &[T]) {
        if let Err(e) = self.check_buffers(src.len(), dest.len()) {
            panic!("pad: {e}");
        }
    }
}

fn product(what: &'static str, dims: &[usize]) -> Result<usize, ShapeError> {
    dims.iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or(ShapeError::SizeOverflow { what })
}

fn padded(what: &'static str, input: usize, padding: usize) -> Result<usize, ShapeError> {
    padding
        .checked_mul(2)
        .and_then(|both| both.checked_add(input))
        .ok_or(ShapeError::SizeOverflow { what })
}
