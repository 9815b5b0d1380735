//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::descriptor::Precision;
use crate::registry::{self, TransformSet};
use num_traits::float::{Float, FloatConst};
use num_traits::identities::{one, zero};
use num_traits::{cast, NumAssign};
use std::fmt::Debug;

/// Source of the sine constants that seed every twiddle recurrence.
///
/// Only two or three values are requested per table, so a provider is free to
/// compute them with arbitrary precision as long as the result is accurate
/// to the epsilon of `W`.
pub trait TrigConstantProvider<W> {
    /// Returns \\(\sin(2 \pi \cdot numerator / denominator)\\).
    fn sin(&self, numerator: usize, denominator: usize) -> W;
}

/// Sine constants from the float type's own `sin`.
///
/// The angle is reduced into \\([0, \pi / 2]\\) with integer arithmetic first,
/// and quarter turns are returned exactly.
///
/// ```rust
/// use gfft::{NativeTrig, TrigConstantProvider};
///
/// let quarter: f64 = NativeTrig.sin(1, 4);
/// let half: f64 = NativeTrig.sin(1, 2);
/// assert_eq!(quarter, 1.0);
/// assert_eq!(half, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTrig;

impl<W: Float + FloatConst> TrigConstantProvider<W> for NativeTrig {
    fn sin(&self, numerator: usize, denominator: usize) -> W {
        if denominator == 0 {
            return zero();
        }
        let num = numerator % denominator;

        // sin(2π - x) = -sin(x)
        let (num, negate) = if num << 1 > denominator {
            (denominator - num, true)
        } else {
            (num, false)
        };

        let value = if num == 0 || num << 1 == denominator {
            zero()
        } else if num << 2 == denominator {
            one()
        } else if num << 2 < denominator {
            (W::PI() * cast::<_, W>(num << 1).unwrap() / cast(denominator).unwrap()).sin()
        } else {
            // sin(π - x) = sin(x)
            (W::PI() * cast::<_, W>(denominator - (num << 1)).unwrap() / cast(denominator).unwrap())
                .sin()
        };

        if negate {
            -value
        } else {
            value
        }
    }
}

/// Floating point element of a sample buffer.
///
/// Twiddle tables are generated in the wider `Wide` type and rounded once
/// when they are stored.
pub trait Sample: Float + FloatConst + NumAssign + Debug + Send + Sync + 'static {
    type Wide: Float + FloatConst + NumAssign + Debug + Send + Sync + 'static;

    const PRECISION: Precision;

    fn narrow(value: Self::Wide) -> Self;

    /// The process-wide transform set for this element type.
    fn transform_set() -> &'static TransformSet<Self>;
}

impl Sample for f32 {
    type Wide = f64;

    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn narrow(value: f64) -> f32 {
        value as f32
    }

    fn transform_set() -> &'static TransformSet<f32> {
        registry::single_set()
    }
}

impl Sample for f64 {
    type Wide = f64;

    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn narrow(value: f64) -> f64 {
        value
    }

    fn transform_set() -> &'static TransformSet<f64> {
        registry::double_set()
    }
}
