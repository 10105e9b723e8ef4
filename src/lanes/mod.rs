//! 4-wide `f32` vector primitives.
//!
//! Every kernel is written once against [`Lanes`] and instantiated per
//! architecture. The set is deliberately small: load/store, a deinterleaving
//! load for stride-2 rows, lane shifts across a register pair, and an unfused
//! multiply-add.
//!
//! Available implementations:
//! - `scalar`: `[f32; 4]`, builds everywhere
//! - `sse`: `__m128`, x86_64 (SSE2 is part of the base ISA)
//! - `neon`: `float32x4_t`, aarch64

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse;

#[cfg(target_arch = "aarch64")]
pub mod neon;

/// Number of `f32` lanes in one register.
pub const WIDTH: usize = 4;

/// A 4-lane `f32` register.
///
/// `mul_add` must round the product before the add (no FMA) so that every
/// implementation, and the scalar window helpers, produce identical bits.
///
/// # Safety
///
/// Loads and stores go through raw pointers; callers guarantee that
/// `WIDTH` (or `2 * WIDTH` for the deinterleaving load) elements are valid.
pub trait Lanes: Copy {
    unsafe fn zero() -> Self;

    unsafe fn splat(value: f32) -> Self;

    unsafe fn load(ptr: *const f32) -> Self;

    unsafe fn store(self, ptr: *mut f32);

    /// Loads 8 consecutive values and splits them into
    /// `([p0, p2, p4, p6], [p1, p3, p5, p7])`.
    unsafe fn load_deinterleaved(ptr: *const f32) -> (Self, Self);

    /// `[a1, a2, a3, b0]`
    unsafe fn ext1(a: Self, b: Self) -> Self;

    /// `[a2, a3, b0, b1]`
    unsafe fn ext2(a: Self, b: Self) -> Self;

    /// `[a3, b0, b1, b2]`
    unsafe fn ext3(a: Self, b: Self) -> Self;

    /// `acc + a * b`, rounded after the multiply and after the add.
    unsafe fn mul_add(acc: Self, a: Self, b: Self) -> Self;

    unsafe fn add(a: Self, b: Self) -> Self;
}

/// Broadcasts each filter coefficient into its own register.
#[inline(always)]
pub(crate) unsafe fn splat_taps<L: Lanes, const N: usize>(coeffs: &[f32]) -> [L; N] {
    debug_assert!(coeffs.len() >= N);
    std::array::from_fn(|t| unsafe { L::splat(coeffs[t]) })
}

/// Sums `windows[t] * taps[t]` over all taps.
///
/// Even taps go to one accumulator and odd taps to another to shorten the
/// dependency chain. `kernels::window::dot` uses the same order.
#[inline(always)]
pub(crate) unsafe fn accumulate<L: Lanes, const N: usize>(windows: &[L; N], taps: &[L; N]) -> L {
    unsafe {
        let mut even = L::zero();
        let mut odd = L::zero();
        let mut t = 0;
        while t + 1 < N {
            even = L::mul_add(even, windows[t], taps[t]);
            odd = L::mul_add(odd, windows[t + 1], taps[t + 1]);
            t += 2;
        }
        if t < N {
            even = L::mul_add(even, windows[t], taps[t]);
        }
        L::add(even, odd)
    }
}

#[cfg(test)]
mod tests {
    use super::scalar::ScalarLanes;
    use super::*;

    fn lanes<L: Lanes>(v: L) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { v.store(out.as_mut_ptr()) };
        out
    }

    fn check_primitives<L: Lanes>() {
        let data: Vec<f32> = (0..8).map(|i| i as f32).collect();
        unsafe {
            let a = L::load(data.as_ptr());
            let b = L::load(data.as_ptr().add(4));
            assert_eq!(lanes(a), [0.0, 1.0, 2.0, 3.0]);
            assert_eq!(lanes(L::ext1(a, b)), [1.0, 2.0, 3.0, 4.0]);
            assert_eq!(lanes(L::ext2(a, b)), [2.0, 3.0, 4.0, 5.0]);
            assert_eq!(lanes(L::ext3(a, b)), [3.0, 4.0, 5.0, 6.0]);

            let (even, odd) = L::load_deinterleaved(data.as_ptr());
            assert_eq!(lanes(even), [0.0, 2.0, 4.0, 6.0]);
            assert_eq!(lanes(odd), [1.0, 3.0, 5.0, 7.0]);

            let r = L::mul_add(L::splat(1.0), a, L::splat(2.0));
            assert_eq!(lanes(r), [1.0, 3.0, 5.0, 7.0]);
            assert_eq!(lanes(L::add(a, b)), [4.0, 6.0, 8.0, 10.0]);
            assert_eq!(lanes(L::zero()), [0.0; 4]);
        }
    }

    #[test]
    fn scalar_primitives() {
        check_primitives::<ScalarLanes>();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse_primitives() {
        check_primitives::<super::sse::SseLanes>();
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn neon_primitives() {
        check_primitives::<super::neon::NeonLanes>();
    }

    #[test]
    fn accumulate_splits_taps_by_parity() {
        let windows: [ScalarLanes; 3] = unsafe { [1.0, 2.0, 4.0].map(|v| ScalarLanes::splat(v)) };
        let taps: [ScalarLanes; 3] = unsafe { splat_taps(&[1.0, 10.0, 100.0]) };
        let sum = unsafe { accumulate(&windows, &taps) };
        assert_eq!(lanes(sum), [421.0; 4]);
    }
}
