//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::error::{GfftError, GfftResult};

/// Largest radix the butterfly engine has closed-form kernels for.
pub const MAX_RADIX: usize = 3;

/// A run of equal radices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factor {
    pub value: usize,
    pub count: usize,
}

struct FactorIterator {
    value: usize,
    prime: usize,
}

impl Iterator for FactorIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.value <= 1 {
                return None;
            }
            if self.prime * self.prime > self.value {
                let v = self.value;
                self.value = 1;
                return Some(v);
            }
            if self.value % self.prime == 0 {
                self.value /= self.prime;
                return Some(self.prime);
            }
            self.prime += if self.prime == 2 { 1 } else { 2 };
        }
    }
}

fn prime_factorization_iter(value: usize) -> FactorIterator {
    FactorIterator { value, prime: 2 }
}

/// Radix sequence for `len`: every factor 2 first, then every factor 3.
///
/// The first prime above [`MAX_RADIX`] is reported in the error.
pub fn radix_factorization(len: usize) -> GfftResult<Vec<usize>> {
    if len == 0 {
        return Err(GfftError::UnsupportedLength { len, factor: None });
    }
    let mut factors = Vec::new();
    for p in prime_factorization_iter(len) {
        if p > MAX_RADIX {
            return Err(GfftError::UnsupportedLength {
                len,
                factor: Some(p),
            });
        }
        factors.push(p);
    }
    Ok(factors)
}

/// Groups consecutive equal radices.
pub fn group_factors(factors: &[usize]) -> Vec<Factor> {
    let mut groups = Vec::<Factor>::new();
    for &value in factors {
        match groups.last_mut() {
            Some(last) if last.value == value => last.count += 1,
            _ => groups.push(Factor { value, count: 1 }),
        }
    }
    groups
}

/// True when `len` is a nonzero product of 2s and 3s.
pub fn is_smooth(len: usize) -> bool {
    radix_factorization(len).is_ok()
}
