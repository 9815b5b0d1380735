//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::butterfly::ButterflyEngine;
use crate::config::EngineConfig;
use crate::descriptor::{Decimation, Direction, Domain, Placement, TransformDescriptor};
use crate::error::{GfftError, GfftResult};
use crate::permutation::PermutationTable;
use crate::real_packing::RealPacking;
use crate::registry::TableCache;
use crate::sample::Sample;
use crate::scaling::ScalingPolicy;
use log::{debug, trace};
use std::sync::Arc;

/// Observable shape of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Natural order into digit-reversed order.
    Gather,
    /// Digit-reversed order back into natural order.
    Scatter,
    Butterfly(Decimation),
    Pack(Direction),
    Scale(ScalingPolicy),
}

#[derive(Debug)]
enum Stage<T> {
    Permute {
        table: Arc<PermutationTable>,
        scatter: bool,
    },
    Butterfly(ButterflyEngine<T>),
    Pack(RealPacking<T>),
    Scale(ScalingPolicy),
}

impl<T: Sample> Stage<T> {
    fn apply(&self, data: &mut [T]) {
        match self {
            Stage::Permute {
                table,
                scatter: false,
            } => table.gather(data),
            Stage::Permute {
                table,
                scatter: true,
            } => table.scatter(data),
            Stage::Butterfly(engine) => engine.apply(data),
            Stage::Pack(packing) => packing.apply(data),
            Stage::Scale(policy) => policy.apply(data),
        }
    }

    fn apply_from(&self, source: &[T], dest: &mut [T]) {
        match self {
            Stage::Butterfly(engine) => engine.apply_from(source, dest),
            _ => {
                dest.copy_from_slice(source);
                self.apply(dest);
            }
        }
    }

    fn kind(&self) -> StageKind {
        match self {
            Stage::Permute { scatter: false, .. } => StageKind::Gather,
            Stage::Permute { scatter: true, .. } => StageKind::Scatter,
            Stage::Butterfly(engine) => StageKind::Butterfly(engine.decimation()),
            Stage::Pack(packing) => StageKind::Pack(packing.direction()),
            Stage::Scale(policy) => StageKind::Scale(*policy),
        }
    }
}

/// An executable transform: a fixed sequence of stages run over a
/// caller-owned buffer.
///
/// A pipeline never allocates. The buffer holds `2 * len` interleaved values
/// for a complex transform and `len` values for a real one; the packed real
/// spectrum layout is described on [`RealPacking`].
///
/// # Example
///
/// ```rust
/// use gfft::{Decimation, Direction, Domain, Placement};
///
/// let fft = gfft::transform::<f64>(4, Direction::Forward, Domain::Complex,
///                                  Decimation::Time, Placement::InPlace).unwrap();
/// let mut data = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// fft.apply(&mut data).unwrap();
/// assert_eq!(data, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
/// ```
#[derive(Debug)]
pub struct Pipeline<T> {
    descriptor: TransformDescriptor,
    stages: Vec<Stage<T>>,
}

impl<T: Sample> Pipeline<T> {
    pub(crate) fn compose(
        descriptor: TransformDescriptor,
        tables: &TableCache<T>,
        config: &EngineConfig,
    ) -> Self {
        let direction = descriptor.direction();
        let decimation = descriptor.decimation();
        let core_factors = descriptor.core_factors();
        let unpack_first = descriptor.domain() == Domain::Real && direction == Direction::Inverse;

        let engine = ButterflyEngine::new(
            core_factors,
            direction,
            decimation,
            tables.provider(),
            |len| tables.twiddle(len, direction),
            config.parallel_threshold,
        );
        let permute = |scatter| Stage::Permute {
            table: tables.permutation(core_factors),
            scatter,
        };

        let mut stages = Vec::with_capacity(4);
        if unpack_first {
            stages.push(Stage::Pack(packing(&descriptor, tables)));
        }
        match decimation {
            Decimation::Time => {
                // strided reads from the source replace the reordering
                let fused = descriptor.placement() == Placement::OutOfPlace && !unpack_first;
                if !fused {
                    stages.push(permute(false));
                }
                stages.push(Stage::Butterfly(engine));
            }
            Decimation::Frequency => {
                stages.push(Stage::Butterfly(engine));
                stages.push(permute(true));
            }
        }
        match (descriptor.domain(), direction) {
            (Domain::Real, Direction::Forward) => {
                stages.push(Stage::Pack(packing(&descriptor, tables)));
            }
            (_, Direction::Inverse) => {
                stages.push(Stage::Scale(ScalingPolicy::Backward(descriptor.core_len())));
            }
            (Domain::Complex, Direction::Forward) => {}
        }

        debug!(
            "built pipeline for {}: {:?}",
            descriptor,
            stages.iter().map(Stage::kind).collect::<Vec<_>>()
        );
        Self { descriptor, stages }
    }

    #[inline]
    pub fn descriptor(&self) -> &TransformDescriptor {
        &self.descriptor
    }

    /// Number of values every buffer handed to this pipeline must hold.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.descriptor.buffer_len()
    }

    pub fn stages(&self) -> Vec<StageKind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    /// Transforms `data` in place.
    ///
    /// Fails with `PlacementMismatch` on an out-of-place pipeline and with
    /// `BufferSizeMismatch` when `data.len() != buffer_len()`. The buffer is
    /// untouched on failure.
    pub fn apply(&self, data: &mut [T]) -> GfftResult<()> {
        self.check_placement(Placement::InPlace)?;
        self.check_len(data.len())?;
        trace!("apply {}", self.descriptor);
        for stage in &self.stages {
            stage.apply(data);
        }
        Ok(())
    }

    /// Transforms `source` into `dest`; `source` is left untouched.
    ///
    /// Fails with `PlacementMismatch` on an in-place pipeline and with
    /// `BufferSizeMismatch` when either buffer has the wrong length. `dest` is
    /// untouched on failure.
    pub fn apply_to(&self, source: &[T], dest: &mut [T]) -> GfftResult<()> {
        self.check_placement(Placement::OutOfPlace)?;
        self.check_len(source.len())?;
        self.check_len(dest.len())?;
        trace!("apply_to {}", self.descriptor);
        match self.stages.split_first() {
            Some((first, rest)) => {
                first.apply_from(source, dest);
                for stage in rest {
                    stage.apply(dest);
                }
            }
            None => dest.copy_from_slice(source),
        }
        Ok(())
    }

    fn check_placement(&self, placement: Placement) -> GfftResult<()> {
        if self.descriptor.placement() == placement {
            Ok(())
        } else {
            Err(GfftError::PlacementMismatch {
                placement: self.descriptor.placement(),
            })
        }
    }

    fn check_len(&self, actual: usize) -> GfftResult<()> {
        let expected = self.buffer_len();
        if actual == expected {
            Ok(())
        } else {
            Err(GfftError::BufferSizeMismatch { expected, actual })
        }
    }
}

fn packing<T: Sample>(descriptor: &TransformDescriptor, tables: &TableCache<T>) -> RealPacking<T> {
    let len = descriptor.len();
    let direction = descriptor.direction();
    RealPacking::new(len, direction, tables.twiddle(len, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Precision;

    fn compose(
        len: usize,
        direction: Direction,
        domain: Domain,
        decimation: Decimation,
        placement: Placement,
    ) -> Pipeline<f64> {
        let descriptor = TransformDescriptor::new(
            len,
            Precision::Double,
            direction,
            domain,
            decimation,
            placement,
        )
        .unwrap();
        Pipeline::compose(descriptor, &TableCache::default(), &EngineConfig::new())
    }

    #[test]
    fn complex_stage_order() {
        let p = compose(8, Direction::Forward, Domain::Complex, Decimation::Time, Placement::InPlace);
        assert_eq!(
            p.stages(),
            vec![StageKind::Gather, StageKind::Butterfly(Decimation::Time)]
        );

        let p = compose(8, Direction::Inverse, Domain::Complex, Decimation::Frequency, Placement::InPlace);
        assert_eq!(
            p.stages(),
            vec![
                StageKind::Butterfly(Decimation::Frequency),
                StageKind::Scatter,
                StageKind::Scale(ScalingPolicy::Backward(8)),
            ]
        );

        let p = compose(8, Direction::Forward, Domain::Complex, Decimation::Time, Placement::OutOfPlace);
        assert_eq!(p.stages(), vec![StageKind::Butterfly(Decimation::Time)]);
    }

    #[test]
    fn real_stage_order() {
        let p = compose(12, Direction::Forward, Domain::Real, Decimation::Frequency, Placement::InPlace);
        assert_eq!(
            p.stages(),
            vec![
                StageKind::Butterfly(Decimation::Frequency),
                StageKind::Scatter,
                StageKind::Pack(Direction::Forward),
            ]
        );

        let p = compose(12, Direction::Inverse, Domain::Real, Decimation::Time, Placement::OutOfPlace);
        assert_eq!(
            p.stages(),
            vec![
                StageKind::Pack(Direction::Inverse),
                StageKind::Gather,
                StageKind::Butterfly(Decimation::Time),
                StageKind::Scale(ScalingPolicy::Backward(6)),
            ]
        );
    }

    #[test]
    fn rejects_wrong_call() {
        let p = compose(4, Direction::Forward, Domain::Complex, Decimation::Time, Placement::InPlace);
        let source = [0.0; 8];
        let mut dest = [0.0; 8];
        assert_eq!(
            p.apply_to(&source, &mut dest),
            Err(GfftError::PlacementMismatch {
                placement: Placement::InPlace
            })
        );

        let p = compose(4, Direction::Forward, Domain::Complex, Decimation::Time, Placement::OutOfPlace);
        let mut data = [0.0; 8];
        assert_eq!(
            p.apply(&mut data),
            Err(GfftError::PlacementMismatch {
                placement: Placement::OutOfPlace
            })
        );
    }

    #[test]
    fn rejects_wrong_len_untouched() {
        let p = compose(4, Direction::Inverse, Domain::Complex, Decimation::Frequency, Placement::InPlace);
        let mut data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(
            p.apply(&mut data),
            Err(GfftError::BufferSizeMismatch {
                expected: 8,
                actual: 6
            })
        );
        assert_eq!(data, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let p = compose(4, Direction::Inverse, Domain::Real, Decimation::Time, Placement::OutOfPlace);
        let source = [1.0, 2.0, 3.0, 4.0];
        let mut dest = [9.0; 5];
        assert_eq!(
            p.apply_to(&source, &mut dest),
            Err(GfftError::BufferSizeMismatch {
                expected: 4,
                actual: 5
            })
        );
        assert_eq!(dest, [9.0; 5]);
    }

    #[test]
    fn out_of_place_leaves_source() {
        let p = compose(6, Direction::Forward, Domain::Complex, Decimation::Frequency, Placement::OutOfPlace);
        let source = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut dest = [0.0; 12];
        p.apply_to(&source, &mut dest).unwrap();
        assert_eq!(source[0], 1.0);
        for k in 0..6 {
            assert!((dest[2 * k] - 1.0).abs() < 1e-15);
            assert!(dest[2 * k + 1].abs() < 1e-15);
        }
    }
}
