//! Zero padding around each channel of a channel-major tensor.
//!
//! Output layout per channel: `padding_height` zero rows, then every input
//! row framed by `padding_width` zeros on each side, then `padding_height`
//! zero rows.

use crate::lanes::{Lanes, WIDTH};
use crate::shape::PadShape;

/// Pads any element type, using `T::default()` as zero.
///
/// Interior rows are block copies, halo rows block fills.
///
/// # Panics
///
/// Panics if `src` or `dest` is shorter than `shape` requires, or if the
/// padded size overflows `usize`.
pub fn pad<T: Copy + Default>(src: &[T], dest: &mut [T], shape: &PadShape) {
    shape.assert_buffers(src, dest);

    let zero = T::default();
    let width = shape.input_width;
    let side = shape.padding_width;
    let halo = shape.output_width() * shape.padding_height;
    let mut s = 0;
    let mut d = 0;

    for _ in 0..shape.channels {
        dest[d..d + halo].fill(zero);
        d += halo;

        for _ in 0..shape.input_height {
            dest[d..d + side].fill(zero);
            d += side;
            dest[d..d + width].copy_from_slice(&src[s..s + width]);
            d += width;
            s += width;
            dest[d..d + side].fill(zero);
            d += side;
        }

        dest[d..d + halo].fill(zero);
        d += halo;
    }
}

/// `f32` padding that copies interior rows four lanes at a time.
///
/// # Safety
///
/// - [`PadShape::check_buffers`] passes for `src.len()` and `dest.len()`
/// - `L` must be usable on the running CPU
pub unsafe fn pad_with_lanes<L: Lanes>(src: &[f32], dest: &mut [f32], shape: &PadShape) {
    debug_assert!(shape.check_buffers(src.len(), dest.len()).is_ok());

    let width = shape.input_width;
    let side = shape.padding_width;
    let halo = shape.output_width() * shape.padding_height;
    let groups = width / WIDTH;
    let mut s = src.as_ptr();
    let mut d = dest.as_mut_ptr();

    unsafe {
        for _ in 0..shape.channels {
            // 0.0f32 is all zero bits
            d.write_bytes(0, halo);
            d = d.add(halo);

            for _ in 0..shape.input_height {
                d.write_bytes(0, side);
                d = d.add(side);

                for _ in 0..groups {
                    L::load(s).store(d);
                    s = s.add(WIDTH);
                    d = d.add(WIDTH);
                }
                for _ in groups * WIDTH..width {
                    *d = *s;
                    s = s.add(1);
                    d = d.add(1);
                }

                d.write_bytes(0, side);
                d = d.add(side);
            }

            d.write_bytes(0, halo);
            d = d.add(halo);
        }
    }
}
