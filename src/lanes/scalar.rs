//! Portable `[f32; 4]` lanes. Same results as the SIMD versions, bit for bit.

use super::Lanes;

#[derive(Debug, Clone, Copy)]
pub struct ScalarLanes([f32; 4]);

impl Lanes for ScalarLanes {
    #[inline(always)]
    unsafe fn zero() -> Self {
        Self([0.0; 4])
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self([value; 4])
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { Self(ptr.cast::<[f32; 4]>().read_unaligned()) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { ptr.cast::<[f32; 4]>().write_unaligned(self.0) }
    }

    #[inline(always)]
    unsafe fn load_deinterleaved(ptr: *const f32) -> (Self, Self) {
        let p = unsafe { ptr.cast::<[f32; 8]>().read_unaligned() };
        (
            Self([p[0], p[2], p[4], p[6]]),
            Self([p[1], p[3], p[5], p[7]]),
        )
    }

    #[inline(always)]
    unsafe fn ext1(a: Self, b: Self) -> Self {
        Self([a.0[1], a.0[2], a.0[3], b.0[0]])
    }

    #[inline(always)]
    unsafe fn ext2(a: Self, b: Self) -> Self {
        Self([a.0[2], a.0[3], b.0[0], b.0[1]])
    }

    #[inline(always)]
    unsafe fn ext3(a: Self, b: Self) -> Self {
        Self([a.0[3], b.0[0], b.0[1], b.0[2]])
    }

    #[inline(always)]
    unsafe fn mul_add(acc: Self, a: Self, b: Self) -> Self {
        Self(std::array::from_fn(|i| acc.0[i] + a.0[i] * b.0[i]))
    }

    #[inline(always)]
    unsafe fn add(a: Self, b: Self) -> Self {
        Self(std::array::from_fn(|i| a.0[i] + b.0[i]))
    }
}
