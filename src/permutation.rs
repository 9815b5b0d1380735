//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::interleaved;
use crate::prime_factorization;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Strategy {
    Identity,
    BitReverse,
    DigitReverse { radix: usize },
    Cycles(Vec<(usize, usize)>),
}

/// Digit-reversal order for a radix sequence.
///
/// Position `p` of the reordered buffer holds the sample whose index is
/// [`source_index(p)`](Self::source_index). After the permutation every
/// decimation-in-time sub-transform reads a contiguous block, and a
/// decimation-in-frequency result is brought back to natural order by the
/// inverse permutation.
///
/// A single repeated radix gives an involution, applied with pairwise swaps.
/// Mixed radices are applied by following the cycles of the permutation.
#[derive(Debug)]
pub struct PermutationTable {
    factors: Vec<usize>,
    ids: Vec<usize>,
    strategy: Strategy,
}

impl PermutationTable {
    pub fn new(factors: &[usize]) -> Self {
        let ids = calc_digitreverse(factors);
        let groups = prime_factorization::group_factors(factors);
        let strategy = match groups.as_slice() {
            [] => Strategy::Identity,
            [g] if g.count == 1 => Strategy::Identity,
            [g] if g.value == 2 => Strategy::BitReverse,
            [g] => Strategy::DigitReverse { radix: g.value },
            _ => Strategy::Cycles(calc_swaps(&ids)),
        };
        Self {
            factors: factors.to_vec(),
            ids,
            strategy,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    #[inline]
    pub fn source_index(&self, pos: usize) -> usize {
        self.ids[pos]
    }

    /// Applying the permutation twice restores the original order.
    pub fn is_involution(&self) -> bool {
        match self.strategy {
            Strategy::Cycles(_) => false,
            _ => true,
        }
    }

    /// Reorders an interleaved buffer of `len()` complex values so that
    /// position `p` receives the value previously at `source_index(p)`.
    pub fn gather<T>(&self, data: &mut [T]) {
        match self.strategy {
            Strategy::Identity => {}
            Strategy::BitReverse => bitreverse_swap(data, self.len()),
            Strategy::DigitReverse { radix } => {
                let len = self.len();
                digitreverse_swap(data, len, radix, 1, len / radix, 0, 0)
            }
            Strategy::Cycles(ref swaps) => {
                for &(a, b) in swaps {
                    interleaved::swap(data, a, b);
                }
            }
        }
    }

    /// Inverse of [`gather`](Self::gather): the value at position `p` moves
    /// to `source_index(p)`.
    pub fn scatter<T>(&self, data: &mut [T]) {
        match self.strategy {
            Strategy::Cycles(ref swaps) => {
                for &(a, b) in swaps.iter().rev() {
                    interleaved::swap(data, a, b);
                }
            }
            _ => self.gather(data),
        }
    }
}

// The outermost radix ends up as the slowest-varying digit of the position
// and the fastest-varying digit of the source index.
fn calc_digitreverse(factors: &[usize]) -> Vec<usize> {
    let len = factors.iter().product::<usize>();
    let mut ids = Vec::<usize>::with_capacity(len);
    let mut llen = 1_usize;
    ids.push(0);
    for &f in factors.iter().rev() {
        for id in ids.iter_mut().take(llen) {
            *id *= f;
        }
        for i in 1..f {
            for j in 0..llen {
                let id = ids[j] + i;
                ids.push(id);
            }
        }
        llen *= f;
    }
    ids
}

// Swap chain realising `new[p] = old[ids[p]]`, one chain per cycle.
fn calc_swaps(ids: &[usize]) -> Vec<(usize, usize)> {
    let mut visited = vec![false; ids.len()];
    let mut swaps = Vec::with_capacity(ids.len());
    for start in 0..ids.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut cur = start;
        loop {
            let next = ids[cur];
            if next == start {
                break;
            }
            swaps.push((cur, next));
            visited[next] = true;
            cur = next;
        }
    }
    swaps
}

fn bitreverse_swap<T>(data: &mut [T], len: usize) {
    let mut j = 0;
    for i in 0..len {
        if j > i {
            interleaved::swap(data, i, j);
        }
        let mut m = len >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}

// `n` collects digits from the least significant end, `r` from the most
// significant end; every pair is swapped once, from the larger index.
fn digitreverse_swap<T>(
    data: &mut [T],
    len: usize,
    radix: usize,
    low: usize,
    high: usize,
    n: usize,
    r: usize,
) {
    if low == len {
        if n > r {
            interleaved::swap(data, n, r);
        }
        return;
    }
    for d in 0..radix {
        digitreverse_swap(
            data,
            len,
            radix,
            low * radix,
            high / radix,
            n + d * low,
            r + d * high,
        );
    }
}
