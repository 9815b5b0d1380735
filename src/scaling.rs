//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::sample::Sample;
use num_traits::cast;
use num_traits::identities::one;

/// Normalization applied once, as the last stage of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingPolicy {
    /// Leaves the buffer unchanged.
    Forward,
    /// Divides every value by the given length.
    Backward(usize),
}

impl ScalingPolicy {
    pub fn factor<T: Sample>(&self) -> T {
        match *self {
            ScalingPolicy::Forward => one(),
            ScalingPolicy::Backward(len) => one::<T>() / cast(len).unwrap(),
        }
    }

    pub fn apply<T: Sample>(&self, data: &mut [T]) {
        if let ScalingPolicy::Backward(_) = *self {
            let scaler = self.factor::<T>();
            for v in data.iter_mut() {
                *v *= scaler;
            }
        }
    }
}
