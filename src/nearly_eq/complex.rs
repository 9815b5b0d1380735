//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::NearlyEq;
use num_complex::Complex;

impl<A, C: NearlyEq<A>> NearlyEq<Complex<A>> for Complex<C> {
    type Tolerance = C::Tolerance;

    fn default_tolerance() -> C::Tolerance {
        C::default_tolerance()
    }

    fn nearly_eq(&self, other: &Complex<A>, tolerance: C::Tolerance) -> bool {
        self.re.nearly_eq(&other.re, tolerance) && self.im.nearly_eq(&other.im, tolerance)
    }
}
