//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::descriptor::{Decimation, Direction};
use crate::interleaved::{load, store};
use crate::sample::{Sample, TrigConstantProvider};
use crate::twiddle::TwiddleTable;
use num_complex::Complex;
use num_traits::identities::{one, zero};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Sub-transforms up to this many points use closed-form kernels.
const LEAF_MAX: usize = 3;

#[derive(Debug)]
struct Level<T> {
    radix: usize,
    span: usize,
    twiddle: Arc<TwiddleTable<T>>,
}

/// Recursive Cooley-Tukey core over an interleaved complex buffer.
///
/// <script type="text/javascript" src="http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS_CHTML"></script>
/// A level of length \\(n = K M\\) splits into \\(K\\) sub-transforms of
/// length \\(M\\), \\(K\\) being the first remaining radix. With
/// \\(\omega = e\^{-2 \pi i S / n}\\) the decimation-in-time combine is
///
/// \\[ Y_{k + q M} = \sum_{r=0}\^{K-1} \omega\^{r k} Z\^{(r)}_k e\^{-2 \pi i S r q / K} \\]
///
/// and decimation-in-frequency applies the same rotations after the
/// \\(K\\)-point sums instead of before them.
///
/// Decimation-in-time expects its input in digit-reversed order, and
/// decimation-in-frequency leaves its output in digit-reversed order. The
/// exception is [`apply_from`](Self::apply_from) in time, which reads the
/// natural-order source with strides and needs no reordering at all.
#[derive(Debug)]
pub struct ButterflyEngine<T> {
    len: usize,
    direction: Direction,
    decimation: Decimation,
    levels: Vec<Level<T>>,
    rot3: Complex<T>,
    half: T,
    parallel_threshold: usize,
}

impl<T: Sample> ButterflyEngine<T> {
    /// `twiddle(n)` must return the table of length `n` for `direction`.
    pub fn new<P, F>(
        factors: &[usize],
        direction: Direction,
        decimation: Decimation,
        provider: &P,
        mut twiddle: F,
        parallel_threshold: usize,
    ) -> Self
    where
        P: TrigConstantProvider<T::Wide> + ?Sized,
        F: FnMut(usize) -> Arc<TwiddleTable<T>>,
    {
        let len = factors.iter().product::<usize>();
        let mut rest = len;
        let levels = factors
            .iter()
            .take(factors.len().saturating_sub(1))
            .map(|&radix| {
                let level = Level {
                    radix,
                    span: rest / radix,
                    twiddle: twiddle(rest),
                };
                rest /= radix;
                level
            })
            .collect::<Vec<_>>();

        let s3 = provider.sin(1, 3);
        let rot3 = Complex::new(zero(), T::narrow(-direction.sign::<T::Wide>() * s3));

        Self {
            len,
            direction,
            decimation,
            levels,
            rot3,
            half: one::<T>() / (one::<T>() + one()),
            parallel_threshold: parallel_threshold.max(1),
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

    #[inline]
    pub fn decimation(&self) -> Decimation {
        self.decimation
    }

    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Runs the transform on `2 * len()` interleaved values.
    pub fn apply(&self, data: &mut [T]) {
        match self.decimation {
            Decimation::Time => self.dit(data, 0),
            Decimation::Frequency => self.dif(data, 0),
        }
    }

    /// Runs the transform from `source` into `dest`, leaving `source` as it is.
    pub fn apply_from(&self, source: &[T], dest: &mut [T]) {
        match self.decimation {
            Decimation::Time => self.dit_from(source, 0, 1, dest, 0),
            Decimation::Frequency => {
                dest.copy_from_slice(source);
                self.dif(dest, 0);
            }
        }
    }

    fn dit(&self, data: &mut [T], depth: usize) {
        if data.len() >> 1 <= LEAF_MAX {
            self.leaf(data);
            return;
        }
        let level = &self.levels[depth];
        self.each_block(data, level.span << 1, |_, block| self.dit(block, depth + 1));
        self.combine_dit(data, level);
    }

    fn dit_from(&self, source: &[T], offset: usize, stride: usize, dest: &mut [T], depth: usize) {
        let len = dest.len() >> 1;
        if len <= LEAF_MAX {
            for j in 0..len {
                store(dest, j, load(source, offset + j * stride));
            }
            self.leaf(dest);
            return;
        }
        let level = &self.levels[depth];
        let radix = level.radix;
        self.each_block(dest, level.span << 1, |r, block| {
            self.dit_from(source, offset + r * stride, stride * radix, block, depth + 1)
        });
        self.combine_dit(dest, level);
    }

    fn dif(&self, data: &mut [T], depth: usize) {
        if data.len() >> 1 <= LEAF_MAX {
            self.leaf(data);
            return;
        }
        let level = &self.levels[depth];
        self.combine_dif(data, level);
        self.each_block(data, level.span << 1, |_, block| self.dif(block, depth + 1));
    }

    fn combine_dit(&self, data: &mut [T], level: &Level<T>) {
        let span = level.span;
        if level.radix == 2 {
            for j in 0..span {
                let pos1 = j + span;
                let z0 = load(data, j);
                let z1 = load(data, pos1) * level.twiddle.get(j);
                store(data, j, z0 + z1);
                store(data, pos1, z0 - z1);
            }
        } else {
            for j in 0..span {
                let pos1 = j + span;
                let pos2 = pos1 + span;
                let (w1, w2) = (level.twiddle.get(j), level.twiddle.get(j << 1));
                let (y0, y1, y2) = self.dft3(
                    load(data, j),
                    load(data, pos1) * w1,
                    load(data, pos2) * w2,
                );
                store(data, j, y0);
                store(data, pos1, y1);
                store(data, pos2, y2);
            }
        }
    }

    fn combine_dif(&self, data: &mut [T], level: &Level<T>) {
        let span = level.span;
        if level.radix == 2 {
            for j in 0..span {
                let pos1 = j + span;
                let z0 = load(data, j);
                let z1 = load(data, pos1);
                store(data, j, z0 + z1);
                store(data, pos1, (z0 - z1) * level.twiddle.get(j));
            }
        } else {
            for j in 0..span {
                let pos1 = j + span;
                let pos2 = pos1 + span;
                let (w1, w2) = (level.twiddle.get(j), level.twiddle.get(j << 1));
                let (y0, y1, y2) = self.dft3(load(data, j), load(data, pos1), load(data, pos2));
                store(data, j, y0);
                store(data, pos1, y1 * w1);
                store(data, pos2, y2 * w2);
            }
        }
    }

    fn leaf(&self, data: &mut [T]) {
        match data.len() >> 1 {
            2 => {
                let z0 = load(data, 0);
                let z1 = load(data, 1);
                store(data, 0, z0 + z1);
                store(data, 1, z0 - z1);
            }
            3 => {
                let (y0, y1, y2) = self.dft3(load(data, 0), load(data, 1), load(data, 2));
                store(data, 0, y0);
                store(data, 1, y1);
                store(data, 2, y2);
            }
            _ => {}
        }
    }

    #[inline(always)]
    fn dft3(
        &self,
        z0: Complex<T>,
        z1: Complex<T>,
        z2: Complex<T>,
    ) -> (Complex<T>, Complex<T>, Complex<T>) {
        let t1 = z1 + z2;
        let t2 = z0 - t1 * self.half;
        let t3 = (z1 - z2) * self.rot3;
        (z0 + t1, t2 + t3, t2 - t3)
    }

    // Fork-join over the sub-transforms of one level; returns only after every
    // block is done.
    fn each_block<F>(&self, data: &mut [T], block: usize, f: F)
    where
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if data.len() >> 1 >= self.parallel_threshold {
                data.par_chunks_mut(block)
                    .enumerate()
                    .for_each(|(r, chunk)| f(r, chunk));
                return;
            }
        }
        for (r, chunk) in data.chunks_mut(block).enumerate() {
            f(r, chunk);
        }
    }
}
