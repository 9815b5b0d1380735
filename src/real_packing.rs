//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::descriptor::Direction;
use crate::interleaved::{load, store};
use crate::sample::Sample;
use crate::twiddle::TwiddleTable;
use num_complex::Complex;
use num_traits::identities::one;
use std::sync::Arc;

/// Recombination between a length-`n` real transform and the length-`n/2`
/// complex transform of its sample pairs.
///
/// <script type="text/javascript" src="http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS_CHTML"></script>
/// The real samples are read as \\(z_j = x_{2j} + i x_{2j+1}\\). After the
/// half-length forward transform \\(Z\\), the spectrum is
///
/// \\[ X_k = \frac{Z_k + \overline{Z_{m-k}}}{2} + e\^{-\frac{2 \pi i k}{n}} \frac{Z_k - \overline{Z_{m-k}}}{2i} \\]
///
/// with \\(m = n / 2\\). The packed layout holds \\(X_0\\) and \\(X_m\\), both
/// real, in the first two slots, followed by \\(X_1 .. X_{m-1}\\).
///
/// The inverse direction undoes this exactly and leaves \\(Z\\) in the buffer,
/// ready for the half-length inverse transform.
#[derive(Debug)]
pub struct RealPacking<T> {
    len: usize,
    direction: Direction,
    twiddle: Arc<TwiddleTable<T>>,
    half: T,
}

impl<T: Sample> RealPacking<T> {
    /// `twiddle` must have length `len` and the same direction.
    pub fn new(len: usize, direction: Direction, twiddle: Arc<TwiddleTable<T>>) -> Self {
        debug_assert_eq!(twiddle.len(), len);
        debug_assert_eq!(twiddle.direction(), direction);
        Self {
            len,
            direction,
            twiddle,
            half: one::<T>() / (one::<T>() + one()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Packs (forward) or unpacks (inverse) `len()` values in place.
    pub fn apply(&self, data: &mut [T]) {
        let sign = self.direction.sign::<T>();
        let half = self.half;
        let m = self.len >> 1;

        for i in 1..((m + 1) >> 1) {
            let a = load(data, i);
            let b = load(data, m - i);
            let h1 = Complex::new(half * (a.re + b.re), half * (a.im - b.im));
            let h2 = Complex::new(sign * half * (a.im + b.im), -sign * half * (a.re - b.re));
            let h3 = self.twiddle.get(i) * h2;
            store(data, i, h1 + h3);
            store(data, m - i, Complex::new(h1.re - h3.re, h3.im - h1.im));
        }

        let z0 = load(data, 0);
        let edge = match self.direction {
            Direction::Forward => Complex::new(z0.re + z0.im, z0.re - z0.im),
            Direction::Inverse => Complex::new(half * (z0.re + z0.im), half * (z0.re - z0.im)),
        };
        store(data, 0, edge);

        // middle bin: X[m/2] is the conjugate of Z[m/2]
        if m > 1 && m & 1 == 0 {
            data[m + 1] = -data[m + 1];
        }
    }
}
