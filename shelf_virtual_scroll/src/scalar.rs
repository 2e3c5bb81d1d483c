// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction for heights, offsets, and scroll positions.
//!
//! Only `f32` and `f64` implement it.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for item heights, offsets, and scroll positions.
///
/// Implemented for `f32` and `f64`. Hosts usually pick whatever their UI
/// runtime reports scroll positions in.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity.
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns the minimum of `self` and `other`.
    fn min(self, other: Self) -> Self;

    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Returns `true` if the value is negative, including `-0.0`.
    fn is_sign_negative(self) -> bool;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Floors the value and converts it to `isize`.
    ///
    /// Out-of-range values saturate; callers clamp the result to an index
    /// range afterwards.
    fn floor_to_isize(self) -> isize;

    /// Ceils the value and converts it to `isize`, saturating like
    /// [`Scalar::floor_to_isize`].
    fn ceil_to_isize(self) -> isize;

    /// Clamps negative values to zero.
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Returns `true` if this is usable as an item height: finite and
    /// strictly positive.
    fn is_usable_height(self) -> bool {
        self.is_finite() && self > Self::zero()
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $floor:path, $ceil:path) => {
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn max(self, other: Self) -> Self {
                Self::max(self, other)
            }

            fn min(self, other: Self) -> Self {
                Self::min(self, other)
            }

            fn is_finite(self) -> bool {
                Self::is_finite(self)
            }

            fn is_sign_negative(self) -> bool {
                Self::is_sign_negative(self)
            }

            fn from_usize(value: usize) -> Self {
                value as Self
            }

            #[expect(
                clippy::cast_possible_truncation,
                reason = "Float-to-int casts saturate; the index is clamped right after"
            )]
            fn floor_to_isize(self) -> isize {
                $floor(self) as isize
            }

            #[expect(
                clippy::cast_possible_truncation,
                reason = "Float-to-int casts saturate; the index is clamped right after"
            )]
            fn ceil_to_isize(self) -> isize {
                $ceil(self) as isize
            }
        }
    };
}

impl_scalar!(f32, floor_f32, ceil_f32);
impl_scalar!(f64, floor_f64, ceil_f64);

// `f32::floor` and friends live in `std`; these cover the `no_std` build.
// Magnitudes at or above 2^52 are already integral, and everything below fits
// an `i64`, so truncating and correcting negative fractions is exact.
macro_rules! impl_floor_ceil {
    ($ty:ty, $floor:ident, $ceil:ident) => {
        fn $floor(v: $ty) -> $ty {
            const INTEGRAL_LIMIT: $ty = 4_503_599_627_370_496.0;
            if !v.is_finite() || v >= INTEGRAL_LIMIT || v <= -INTEGRAL_LIMIT {
                return v;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "The magnitude is below 2^52, which fits an i64"
            )]
            let t = v as i64 as $ty;
            if t > v { t - 1.0 } else { t }
        }

        fn $ceil(v: $ty) -> $ty {
            -$floor(-v)
        }
    };
}

impl_floor_ceil!(f32, floor_f32, ceil_f32);
impl_floor_ceil!(f64, floor_f64, ceil_f64);
