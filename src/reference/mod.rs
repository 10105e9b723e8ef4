//! Reference implementations.
//!
//! These provide correctness baselines for the SIMD kernels and the fallback
//! for filter shapes that have no specialized kernel.

pub mod naive;
