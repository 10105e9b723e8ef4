//! SSE lanes for x86_64.
//!
//! Only SSE2 instructions are used, which every x86_64 CPU has, so there is
//! no `#[target_feature]` gate here. Lane shifts are built from shuffles
//! rather than `palignr` to stay inside that baseline.

use super::Lanes;
use std::arch::x86_64::*;

#[derive(Clone, Copy)]
pub struct SseLanes(__m128);

impl Lanes for SseLanes {
    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        unsafe { Self(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { Self(_mm_loadu_ps(ptr)) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm_storeu_ps(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn load_deinterleaved(ptr: *const f32) -> (Self, Self) {
        unsafe {
            let lo = _mm_loadu_ps(ptr);
            let hi = _mm_loadu_ps(ptr.add(4));
            // _MM_SHUFFLE(2, 0, 2, 0) and _MM_SHUFFLE(3, 1, 3, 1)
            (
                Self(_mm_shuffle_ps::<0x88>(lo, hi)),
                Self(_mm_shuffle_ps::<0xDD>(lo, hi)),
            )
        }
    }

    #[inline(always)]
    unsafe fn ext1(a: Self, b: Self) -> Self {
        unsafe {
            // [b0, a1, a2, a3] rotated left by one lane
            let t = _mm_move_ss(a.0, b.0);
            Self(_mm_shuffle_ps::<0x39>(t, t))
        }
    }

    #[inline(always)]
    unsafe fn ext2(a: Self, b: Self) -> Self {
        unsafe { Self(_mm_shuffle_ps::<0x4E>(a.0, b.0)) }
    }

    #[inline(always)]
    unsafe fn ext3(a: Self, b: Self) -> Self {
        unsafe {
            // [a3, a3, b0, b0], then pick lanes 0 and 2 plus b1, b2
            let t = _mm_shuffle_ps::<0x0F>(a.0, b.0);
            Self(_mm_shuffle_ps::<0x98>(t, b.0))
        }
    }

    #[inline(always)]
    unsafe fn mul_add(acc: Self, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_add_ps(acc.0, _mm_mul_ps(a.0, b.0))) }
    }

    #[inline(always)]
    unsafe fn add(a: Self, b: Self) -> Self {
        unsafe { Self(_mm_add_ps(a.0, b.0)) }
    }
}
