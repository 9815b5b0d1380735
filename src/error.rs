//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::descriptor::{Placement, TransformDescriptor};
use thiserror::Error;

pub type GfftResult<T> = Result<T, GfftError>;

/// Errors raised while resolving or executing a transform.
///
/// None of them is transient: each one points at a configuration or
/// buffer-sizing mistake on the caller's side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GfftError {
    /// The length cannot be split into radix-2 and radix-3 stages.
    #[error("unsupported transform length {len}: {}", length_reason(.factor))]
    UnsupportedLength { len: usize, factor: Option<usize> },
    /// A caller-supplied buffer does not have the size the pipeline needs.
    #[error("buffer size mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    /// The configuration was never declared in the parameter space.
    #[error("configuration {descriptor} was never declared")]
    UnregisteredConfiguration { descriptor: TransformDescriptor },
    /// `apply` was called on an out-of-place pipeline or `apply_to` on an in-place one.
    #[error("pipeline is {placement} and cannot run this way")]
    PlacementMismatch { placement: Placement },
}

fn length_reason(factor: &Option<usize>) -> String {
    match factor {
        Some(p) => format!("prime factor {} is not a supported radix (2 or 3)", p),
        None => "length must be nonzero, and even for real-valued transforms".to_string(),
    }
}
