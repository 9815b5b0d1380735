//! Generic Fast Fourier Transform.
//!
//! Recursive Cooley-Tukey transforms for lengths of the form \\(2\^a 3\^b\\),
//! complex or real, forward or inverse, decimated in time or in frequency,
//! in place or out of place. Every configuration is described by a
//! [`TransformDescriptor`] and resolved at runtime into a shared
//! [`Pipeline`] by a [`TransformSet`].
//!
//! Buffers are interleaved: `[re0, im0, re1, im1, ...]` for a complex
//! transform of `n` points (`2n` values), plain samples for a real transform
//! (`n` values, see [`RealPacking`] for the packed spectrum).
//!
//! The forward transform is
//!
//! \\[ Y_k = \sum_{j=0}\^{n-1} X_j e\^{- \frac {2 \pi i j k}{n}} \\]
//!
//! and the inverse uses the opposite sign and divides by \\(n\\).
//!
//! # Example
//!
//! ```rust
//! use gfft::{Decimation, Direction, Domain, Placement};
//!
//! let forward = gfft::transform::<f64>(6, Direction::Forward, Domain::Complex,
//!                                      Decimation::Frequency, Placement::OutOfPlace).unwrap();
//! let inverse = gfft::transform::<f64>(6, Direction::Inverse, Domain::Complex,
//!                                      Decimation::Time, Placement::InPlace).unwrap();
//!
//! let input = [1.0, 0.0, 2.0, -1.0, 0.5, 0.5, 0.0, 3.0, -2.0, 1.0, 1.0, 1.0];
//! let mut spectrum = [0.0; 12];
//! forward.apply_to(&input, &mut spectrum).unwrap();
//! inverse.apply(&mut spectrum).unwrap();
//!
//! for (a, b) in spectrum.iter().zip(input.iter()) {
//!     assert!((a - b).abs() < 1e-12);
//! }
//! ```
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

#[cfg(test)]
#[macro_use]
mod nearly_eq;

mod butterfly;
mod config;
mod descriptor;
mod error;
mod interleaved;
mod permutation;
mod pipeline;
mod prime_factorization;
mod real_packing;
mod registry;
mod sample;
mod scaling;
mod twiddle;

pub use crate::butterfly::ButterflyEngine;
pub use crate::config::{EngineConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use crate::descriptor::{
    Decimation, Direction, Domain, Placement, Precision, TransformDescriptor,
};
pub use crate::error::{GfftError, GfftResult};
pub use crate::permutation::PermutationTable;
pub use crate::pipeline::{Pipeline, StageKind};
pub use crate::prime_factorization::{is_smooth, radix_factorization, MAX_RADIX};
pub use crate::real_packing::RealPacking;
pub use crate::registry::{resolve, transform, ParameterSpace, TransformSet, DEFAULT_MAX_LEN};
pub use crate::sample::{NativeTrig, Sample, TrigConstantProvider};
pub use crate::scaling::ScalingPolicy;
pub use crate::twiddle::{TwiddleRecurrence, TwiddleTable};
