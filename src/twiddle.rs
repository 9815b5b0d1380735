//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::descriptor::Direction;
use crate::sample::{Sample, TrigConstantProvider};
use num_complex::Complex;
use num_traits::float::Float;
use num_traits::identities::{one, zero};

/// Successive powers of \\(\omega = e\^{-2 \pi i S / n}\\) without a
/// trigonometric call per step.
///
/// Seeded with \\(w_{pr} = -2 \sin\^2(\pi / n)\\) and
/// \\(w_{pi} = -S \sin(2 \pi / n)\\), each step computes
///
/// \\[ w \leftarrow w + w \cdot (w_{pr} + i w_{pi}) \\]
///
/// No renormalization is performed, so the rounding error of the k-th value
/// grows roughly like \\(k \epsilon\\). With a `f64` working type this stays
/// below `1e-11` for the lengths up to a few hundred thousand points.
///
/// ```rust
/// use gfft::{Direction, NativeTrig, TwiddleRecurrence};
///
/// let w = TwiddleRecurrence::<f64>::new(4, Direction::Forward, &NativeTrig)
///     .take(4)
///     .collect::<Vec<_>>();
/// assert!((w[1].re - 0.0).abs() < 1e-15 && (w[1].im + 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TwiddleRecurrence<W> {
    wr: W,
    wi: W,
    wpr: W,
    wpi: W,
}

impl<W: Float> TwiddleRecurrence<W> {
    pub fn new<P: TrigConstantProvider<W> + ?Sized>(
        len: usize,
        direction: Direction,
        provider: &P,
    ) -> Self {
        let half = provider.sin(1, len << 1);
        let two: W = one::<W>() + one();
        Self {
            wr: one(),
            wi: zero(),
            wpr: -two * half * half,
            wpi: -direction.sign::<W>() * provider.sin(1, len),
        }
    }

    #[inline]
    pub fn current(&self) -> Complex<W> {
        Complex::new(self.wr, self.wi)
    }

    #[inline]
    pub fn advance(&mut self) {
        let wtemp = self.wr;
        self.wr = self.wr + (self.wr * self.wpr - self.wi * self.wpi);
        self.wi = self.wi + (self.wi * self.wpr + wtemp * self.wpi);
    }
}

impl<W: Float> Iterator for TwiddleRecurrence<W> {
    type Item = Complex<W>;

    #[inline]
    fn next(&mut self) -> Option<Complex<W>> {
        let w = self.current();
        self.advance();
        Some(w)
    }
}

/// \\(\omega\^k\\) for \\(k = 0 .. n\\), produced by [`TwiddleRecurrence`] in the
/// wide type of `T` and rounded once.
#[derive(Debug)]
pub struct TwiddleTable<T> {
    len: usize,
    direction: Direction,
    omega: Vec<Complex<T>>,
}

impl<T: Sample> TwiddleTable<T> {
    pub fn new<P: TrigConstantProvider<T::Wide> + ?Sized>(
        len: usize,
        direction: Direction,
        provider: &P,
    ) -> Self {
        let omega = TwiddleRecurrence::<T::Wide>::new(len, direction, provider)
            .take(len)
            .map(|w| Complex::new(T::narrow(w.re), T::narrow(w.im)))
            .collect();
        Self {
            len,
            direction,
            omega,
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

    #[inline(always)]
    pub fn get(&self, k: usize) -> Complex<T> {
        self.omega[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::NativeTrig;
    use num_traits::cast;
    use num_traits::float::FloatConst;
    use std::fmt::Debug;

    fn exact<T: Float + FloatConst>(len: usize, k: usize, sign: T) -> Complex<T> {
        Complex::from_polar(
            one(),
            -sign * cast::<_, T>(2 * k).unwrap() * T::PI() / cast(len).unwrap(),
        )
    }

    fn check_table<T: Sample + Debug>(len: usize, direction: Direction, eps: T) {
        let table = TwiddleTable::<T>::new(len, direction, &NativeTrig);
        assert_eq!(table.len(), len);
        for k in 0..len {
            let diff = (table.get(k) - exact(len, k, direction.sign::<T>())).norm();
            assert!(
                diff < eps,
                "len {} k {}: {:?} (diff {:?})",
                len,
                k,
                table.get(k),
                diff
            );
        }
    }

    #[test]
    fn starts_at_one() {
        let mut rec = TwiddleRecurrence::<f64>::new(8, Direction::Inverse, &NativeTrig);
        assert_eq!(rec.current(), Complex::new(1.0, 0.0));
        rec.advance();
        let w = rec.current();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((w.re - s).abs() < 1e-15);
        assert!((w.im - s).abs() < 1e-15);
    }

    #[test]
    fn f64_tables() {
        for &len in &[1, 2, 3, 4, 6, 8, 9, 12, 64, 243, 1024, 4096] {
            check_table::<f64>(len, Direction::Forward, 1e-11);
            check_table::<f64>(len, Direction::Inverse, 1e-11);
        }
    }

    #[test]
    fn f32_tables() {
        for &len in &[2, 3, 16, 96, 1024] {
            check_table::<f32>(len, Direction::Forward, 1e-6);
            check_table::<f32>(len, Direction::Inverse, 1e-6);
        }
    }

    #[test]
    fn full_turn_closes() {
        let mut rec = TwiddleRecurrence::<f64>::new(4096, Direction::Forward, &NativeTrig);
        for _ in 0..4096 {
            rec.advance();
        }
        let w = rec.current();
        assert!((w - Complex::new(1.0, 0.0)).norm() < 1e-10);
    }
}
