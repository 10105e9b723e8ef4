//! NEON lanes for aarch64. NEON is mandatory on aarch64, so no runtime check.

use super::Lanes;
use std::arch::aarch64::*;

#[derive(Clone, Copy)]
pub struct NeonLanes(float32x4_t);

impl Lanes for NeonLanes {
    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { Self(vdupq_n_f32(0.0)) }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        unsafe { Self(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { Self(vld1q_f32(ptr)) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn load_deinterleaved(ptr: *const f32) -> (Self, Self) {
        unsafe {
            let pair = vld2q_f32(ptr);
            (Self(pair.0), Self(pair.1))
        }
    }

    #[inline(always)]
    unsafe fn ext1(a: Self, b: Self) -> Self {
        unsafe { Self(vextq_f32::<1>(a.0, b.0)) }
    }

    #[inline(always)]
    unsafe fn ext2(a: Self, b: Self) -> Self {
        unsafe { Self(vextq_f32::<2>(a.0, b.0)) }
    }

    #[inline(always)]
    unsafe fn ext3(a: Self, b: Self) -> Self {
        unsafe { Self(vextq_f32::<3>(a.0, b.0)) }
    }

    #[inline(always)]
    unsafe fn mul_add(acc: Self, a: Self, b: Self) -> Self {
        // vmlaq_f32 is not fused, unlike vfmaq_f32
        unsafe { Self(vmlaq_f32(acc.0, a.0, b.0)) }
    }

    #[inline(always)]
    unsafe fn add(a: Self, b: Self) -> Self {
        unsafe { Self(vaddq_f32(a.0, b.0)) }
    }
}
