//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

// Approximate comparison for the unit tests.

#[macro_use]
mod assert;
mod complex;

use std::fmt::Debug;

pub trait NearlyEq<Rhs: ?Sized = Self> {
    type Tolerance: Copy + Debug;

    fn default_tolerance() -> Self::Tolerance;

    fn nearly_eq(&self, other: &Rhs, tolerance: Self::Tolerance) -> bool;
}

impl NearlyEq for f32 {
    type Tolerance = f32;

    fn default_tolerance() -> f32 {
        1e-5
    }

    fn nearly_eq(&self, other: &f32, tolerance: f32) -> bool {
        *self == *other || (*self - *other).abs() <= tolerance
    }
}

impl NearlyEq for f64 {
    type Tolerance = f64;

    fn default_tolerance() -> f64 {
        1e-10
    }

    fn nearly_eq(&self, other: &f64, tolerance: f64) -> bool {
        *self == *other || (*self - *other).abs() <= tolerance
    }
}

impl<A, C: NearlyEq<A>> NearlyEq<[A]> for [C] {
    type Tolerance = C::Tolerance;

    fn default_tolerance() -> C::Tolerance {
        C::default_tolerance()
    }

    fn nearly_eq(&self, other: &[A], tolerance: C::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.nearly_eq(b, tolerance))
    }
}

impl<A, C: NearlyEq<A>> NearlyEq<Vec<A>> for Vec<C> {
    type Tolerance = C::Tolerance;

    fn default_tolerance() -> C::Tolerance {
        C::default_tolerance()
    }

    fn nearly_eq(&self, other: &Vec<A>, tolerance: C::Tolerance) -> bool {
        self[..].nearly_eq(&other[..], tolerance)
    }
}

pub fn within<A: ?Sized, C: NearlyEq<A> + ?Sized>(
    left: &C,
    right: &A,
    tolerance: C::Tolerance,
) -> bool {
    left.nearly_eq(right, tolerance)
}

pub fn within_default<A: ?Sized, C: NearlyEq<A> + ?Sized>(left: &C, right: &A) -> bool {
    left.nearly_eq(right, C::default_tolerance())
}
