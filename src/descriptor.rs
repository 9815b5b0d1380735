//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::error::{GfftError, GfftResult};
use crate::prime_factorization;
use num_traits::float::Float;
use num_traits::identities::one;
use std::fmt;

/// Numeric type of the sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Single,
    Double,
    /// Declarable, but no element type in this crate implements it.
    Extended,
}

/// Sign of the exponent: `Forward` uses \\(e\^{-2 \pi i j k / n}\\).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Complex,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decimation {
    Time,
    Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    InPlace,
    OutOfPlace,
}

impl Precision {
    pub const ALL: [Precision; 3] = [Precision::Single, Precision::Double, Precision::Extended];

    fn ordinal(self) -> u64 {
        match self {
            Precision::Single => 0,
            Precision::Double => 1,
            Precision::Extended => 2,
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Inverse];

    /// `+1` for forward, `-1` for inverse.
    #[inline]
    pub fn sign<T: Float>(self) -> T {
        match self {
            Direction::Forward => one(),
            Direction::Inverse => -T::one(),
        }
    }
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Complex, Domain::Real];
}

impl Decimation {
    pub const ALL: [Decimation; 2] = [Decimation::Time, Decimation::Frequency];
}

impl Placement {
    pub const ALL: [Placement; 2] = [Placement::InPlace, Placement::OutOfPlace];
}

/// Full configuration of one transform.
///
/// A descriptor can only be built for a length the radix rule can factor, so
/// the product of [`factors`](Self::factors) always equals [`len`](Self::len).
///
/// ```rust
/// use gfft::{Decimation, Direction, Domain, Placement, Precision, TransformDescriptor};
///
/// let desc = TransformDescriptor::new(
///     12,
///     Precision::Double,
///     Direction::Forward,
///     Domain::Complex,
///     Decimation::Time,
///     Placement::InPlace,
/// ).unwrap();
/// assert_eq!(desc.factors(), &[2, 2, 3]);
/// assert_eq!(desc.buffer_len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformDescriptor {
    len: usize,
    precision: Precision,
    direction: Direction,
    domain: Domain,
    decimation: Decimation,
    placement: Placement,
    factors: Vec<usize>,
}

impl TransformDescriptor {
    pub fn new(
        len: usize,
        precision: Precision,
        direction: Direction,
        domain: Domain,
        decimation: Decimation,
        placement: Placement,
    ) -> GfftResult<Self> {
        if domain == Domain::Real && len & 1 != 0 {
            return Err(GfftError::UnsupportedLength { len, factor: None });
        }
        let factors = prime_factorization::radix_factorization(len)?;
        Ok(Self {
            len,
            precision,
            direction,
            domain,
            decimation,
            placement,
            factors,
        })
    }

    /// Rebuilds the descriptor encoded by [`id`](Self::id).
    pub fn from_id(id: u64) -> GfftResult<Self> {
        let placement = Placement::ALL[(id & 1) as usize];
        let id = id >> 1;
        let decimation = Decimation::ALL[(id & 1) as usize];
        let id = id >> 1;
        let domain = Domain::ALL[(id & 1) as usize];
        let id = id >> 1;
        let direction = Direction::ALL[(id & 1) as usize];
        let id = id >> 1;
        let precision = Precision::ALL[(id % 3) as usize];
        let len = (id / 3) as usize + 1;
        Self::new(len, precision, direction, domain, decimation, placement)
    }

    /// Unique number of this configuration within the whole parameter space.
    pub fn id(&self) -> u64 {
        let mut id = (self.len as u64 - 1) * 3 + self.precision.ordinal();
        id = (id << 1) | self.direction as u64;
        id = (id << 1) | self.domain as u64;
        id = (id << 1) | self.decimation as u64;
        (id << 1) | self.placement as u64
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn decimation(&self) -> Decimation {
        self.decimation
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Radix sequence, outermost recursion level first.
    #[inline]
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    /// Number of floats a caller buffer must hold.
    pub fn buffer_len(&self) -> usize {
        match self.domain {
            Domain::Complex => self.len << 1,
            Domain::Real => self.len,
        }
    }

    /// Length of the complex transform that does the actual work.
    pub fn core_len(&self) -> usize {
        match self.domain {
            Domain::Complex => self.len,
            Domain::Real => self.len >> 1,
        }
    }

    /// Radix sequence of the complex core.
    pub fn core_factors(&self) -> &[usize] {
        match self.domain {
            Domain::Complex => &self.factors,
            Domain::Real => &self.factors[1..],
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Precision::Single => "single",
            Precision::Double => "double",
            Precision::Extended => "extended",
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Inverse => "inverse",
        })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Complex => "complex",
            Domain::Real => "real",
        })
    }
}

impl fmt::Display for Decimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decimation::Time => "in-time",
            Decimation::Frequency => "in-frequency",
        })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Placement::InPlace => "in-place",
            Placement::OutOfPlace => "out-of-place",
        })
    }
}

impl fmt::Display for TransformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} n={} ({}, {}, {})",
            self.direction,
            self.domain,
            self.precision,
            self.len,
            self.decimation,
            self.placement,
            self.factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join("x")
        )
    }
}
