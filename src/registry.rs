//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::config::EngineConfig;
use crate::descriptor::{Decimation, Direction, Domain, Placement, Precision, TransformDescriptor};
use crate::error::{GfftError, GfftResult};
use crate::permutation::PermutationTable;
use crate::pipeline::Pipeline;
use crate::prime_factorization;
use crate::sample::{NativeTrig, Sample, TrigConstantProvider};
use crate::twiddle::TwiddleTable;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Largest length declared by [`ParameterSpace::default`].
pub const DEFAULT_MAX_LEN: usize = 1 << 16;

/// Declarative list of the configurations a [`TransformSet`] may serve.
///
/// Length builders add to the list of lengths; the other builders replace
/// their list. Enumeration walks the cartesian product and leaves out every
/// combination that cannot be built.
///
/// ```rust
/// use gfft::{Domain, ParameterSpace, Precision};
///
/// let space = ParameterSpace::new()
///     .with_power_lengths(2, 0..=4)
///     .with_lengths(vec![6, 10])
///     .with_precisions(vec![Precision::Double])
///     .with_domains(vec![Domain::Complex]);
/// // 10 has a factor 5 and is left out
/// assert_eq!(space.descriptors().len(), 6 * 2 * 2 * 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpace {
    lengths: Vec<usize>,
    precisions: Vec<Precision>,
    directions: Vec<Direction>,
    domains: Vec<Domain>,
    decimations: Vec<Decimation>,
    placements: Vec<Placement>,
}

impl ParameterSpace {
    /// No lengths; single and double precision; every other variant.
    pub fn new() -> Self {
        Self {
            lengths: Vec::new(),
            precisions: vec![Precision::Single, Precision::Double],
            directions: Direction::ALL.to_vec(),
            domains: Domain::ALL.to_vec(),
            decimations: Decimation::ALL.to_vec(),
            placements: Placement::ALL.to_vec(),
        }
    }

    pub fn with_lengths<I: IntoIterator<Item = usize>>(mut self, lengths: I) -> Self {
        self.lengths.extend(lengths);
        self
    }

    /// Every length of `range`.
    pub fn with_length_range(self, range: RangeInclusive<usize>) -> Self {
        self.with_lengths(range)
    }

    /// `base` raised to every exponent of `powers`.
    pub fn with_power_lengths(self, base: usize, powers: RangeInclusive<u32>) -> Self {
        self.with_lengths(powers.filter_map(move |p| base.checked_pow(p)))
    }

    /// Every \\(2\^a 3\^b \le max\\).
    pub fn with_smooth_lengths(self, max: usize) -> Self {
        let mut lengths = Vec::new();
        let mut p3 = 1_usize;
        while p3 <= max {
            let mut len = p3;
            while len <= max {
                lengths.push(len);
                match len.checked_mul(2) {
                    Some(next) => len = next,
                    None => break,
                }
            }
            match p3.checked_mul(3) {
                Some(next) => p3 = next,
                None => break,
            }
        }
        self.with_lengths(lengths)
    }

    pub fn with_precisions<I: IntoIterator<Item = Precision>>(mut self, precisions: I) -> Self {
        self.precisions = precisions.into_iter().collect();
        self
    }

    pub fn with_directions<I: IntoIterator<Item = Direction>>(mut self, directions: I) -> Self {
        self.directions = directions.into_iter().collect();
        self
    }

    pub fn with_domains<I: IntoIterator<Item = Domain>>(mut self, domains: I) -> Self {
        self.domains = domains.into_iter().collect();
        self
    }

    pub fn with_decimations<I: IntoIterator<Item = Decimation>>(mut self, decimations: I) -> Self {
        self.decimations = decimations.into_iter().collect();
        self
    }

    pub fn with_placements<I: IntoIterator<Item = Placement>>(mut self, placements: I) -> Self {
        self.placements = placements.into_iter().collect();
        self
    }

    /// Declared lengths, sorted and without duplicates.
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths = self.lengths.clone();
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }

    /// Every buildable descriptor of the space.
    pub fn descriptors(&self) -> Vec<TransformDescriptor> {
        let mut ret = Vec::new();
        for len in self.lengths() {
            for &domain in &self.domains {
                if let Err(err) = check_len(len, domain) {
                    debug!("skipping {} length {}: {}", domain, len, err);
                    continue;
                }
                for &precision in &self.precisions {
                    for &direction in &self.directions {
                        for &decimation in &self.decimations {
                            for &placement in &self.placements {
                                if let Ok(desc) = TransformDescriptor::new(
                                    len, precision, direction, domain, decimation, placement,
                                ) {
                                    ret.push(desc);
                                }
                            }
                        }
                    }
                }
            }
        }
        ret
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new().with_smooth_lengths(DEFAULT_MAX_LEN)
    }
}

fn check_len(len: usize, domain: Domain) -> GfftResult<()> {
    if domain == Domain::Real && len & 1 != 0 {
        return Err(GfftError::UnsupportedLength { len, factor: None });
    }
    prime_factorization::radix_factorization(len).map(|_| ())
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type Provider<W> = dyn TrigConstantProvider<W> + Send + Sync;

/// Twiddle and permutation tables shared by the pipelines of one set.
pub(crate) struct TableCache<T: Sample> {
    provider: Box<Provider<T::Wide>>,
    twiddles: Mutex<HashMap<(usize, Direction), Arc<TwiddleTable<T>>>>,
    permutations: Mutex<HashMap<Vec<usize>, Arc<PermutationTable>>>,
}

impl<T: Sample> TableCache<T> {
    fn new<P: TrigConstantProvider<T::Wide> + Send + Sync + 'static>(provider: P) -> Self {
        Self {
            provider: Box::new(provider),
            twiddles: Mutex::new(HashMap::new()),
            permutations: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn provider(&self) -> &Provider<T::Wide> {
        &*self.provider
    }

    pub(crate) fn twiddle(&self, len: usize, direction: Direction) -> Arc<TwiddleTable<T>> {
        let mut twiddles = lock(&self.twiddles);
        twiddles
            .entry((len, direction))
            .or_insert_with(|| {
                trace!("twiddle table {} {}", direction, len);
                Arc::new(TwiddleTable::new(len, direction, &*self.provider))
            })
            .clone()
    }

    pub(crate) fn permutation(&self, factors: &[usize]) -> Arc<PermutationTable> {
        let mut permutations = lock(&self.permutations);
        if let Some(table) = permutations.get(factors) {
            trace!("permutation table {:?} cached", factors);
            return table.clone();
        }
        trace!("permutation table {:?}", factors);
        let table = Arc::new(PermutationTable::new(factors));
        permutations.insert(factors.to_vec(), table.clone());
        table
    }
}

impl<T: Sample> Default for TableCache<T> {
    fn default() -> Self {
        Self::new(NativeTrig)
    }
}

/// Transforms of one element type, resolved by descriptor.
///
/// The declared configurations are fixed at construction. Each pipeline is
/// built on its first request and shared afterwards; concurrent first
/// requests for the same descriptor build it once.
///
/// ```rust
/// use gfft::{Decimation, Direction, Domain, ParameterSpace, Placement, TransformSet};
///
/// let set = TransformSet::<f32>::new(&ParameterSpace::new().with_lengths(vec![8, 9]));
/// let fft = set.transform(9, Direction::Inverse, Domain::Complex,
///                         Decimation::Frequency, Placement::InPlace).unwrap();
/// assert_eq!(fft.buffer_len(), 18);
/// assert_eq!(set.cached_len(), 1);
/// ```
pub struct TransformSet<T: Sample> {
    declared: HashSet<TransformDescriptor>,
    config: EngineConfig,
    tables: TableCache<T>,
    pipelines: Mutex<HashMap<TransformDescriptor, Arc<Pipeline<T>>>>,
}

impl<T: Sample> TransformSet<T> {
    pub fn new(space: &ParameterSpace) -> Self {
        Self::with_config(space, EngineConfig::default())
    }

    pub fn with_config(space: &ParameterSpace, config: EngineConfig) -> Self {
        Self::with_provider(space, config, NativeTrig)
    }

    /// Seeds every twiddle table from `provider` instead of [`NativeTrig`].
    pub fn with_provider<P>(space: &ParameterSpace, config: EngineConfig, provider: P) -> Self
    where
        P: TrigConstantProvider<T::Wide> + Send + Sync + 'static,
    {
        let declared = space
            .descriptors()
            .into_iter()
            .filter(|desc| desc.precision() == T::PRECISION)
            .collect::<HashSet<_>>();
        debug!("declared {} {} precision transforms", declared.len(), T::PRECISION);
        Self {
            declared,
            config,
            tables: TableCache::new(provider),
            pipelines: Mutex::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the pipeline for `descriptor`, building it on first use.
    pub fn resolve(&self, descriptor: &TransformDescriptor) -> GfftResult<Arc<Pipeline<T>>> {
        if !self.is_declared(descriptor) {
            return Err(GfftError::UnregisteredConfiguration {
                descriptor: descriptor.clone(),
            });
        }
        let mut pipelines = lock(&self.pipelines);
        if let Some(pipeline) = pipelines.get(descriptor) {
            trace!("pipeline {} cached", descriptor);
            return Ok(pipeline.clone());
        }
        let pipeline = Arc::new(Pipeline::compose(
            descriptor.clone(),
            &self.tables,
            &self.config,
        ));
        pipelines.insert(descriptor.clone(), pipeline.clone());
        Ok(pipeline)
    }

    /// Builds the descriptor of this set's precision and resolves it.
    pub fn transform(
        &self,
        len: usize,
        direction: Direction,
        domain: Domain,
        decimation: Decimation,
        placement: Placement,
    ) -> GfftResult<Arc<Pipeline<T>>> {
        let descriptor =
            TransformDescriptor::new(len, T::PRECISION, direction, domain, decimation, placement)?;
        self.resolve(&descriptor)
    }

    /// Resolves the descriptor encoded by [`TransformDescriptor::id`].
    pub fn resolve_id(&self, id: u64) -> GfftResult<Arc<Pipeline<T>>> {
        self.resolve(&TransformDescriptor::from_id(id)?)
    }

    pub fn is_declared(&self, descriptor: &TransformDescriptor) -> bool {
        descriptor.precision() == T::PRECISION && self.declared.contains(descriptor)
    }

    pub fn declared_len(&self) -> usize {
        self.declared.len()
    }

    /// Number of pipelines built so far.
    pub fn cached_len(&self) -> usize {
        lock(&self.pipelines).len()
    }
}

impl<T: Sample> Default for TransformSet<T> {
    fn default() -> Self {
        Self::new(&ParameterSpace::default())
    }
}

impl<T: Sample> fmt::Debug for TransformSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSet")
            .field("precision", &T::PRECISION)
            .field("declared", &self.declared_len())
            .field("cached", &self.cached_len())
            .field("config", &self.config)
            .finish()
    }
}

static SINGLE_SET: OnceLock<TransformSet<f32>> = OnceLock::new();
static DOUBLE_SET: OnceLock<TransformSet<f64>> = OnceLock::new();

pub(crate) fn single_set() -> &'static TransformSet<f32> {
    SINGLE_SET.get_or_init(TransformSet::default)
}

pub(crate) fn double_set() -> &'static TransformSet<f64> {
    DOUBLE_SET.get_or_init(TransformSet::default)
}

/// Resolves `descriptor` in the process-wide set of `T`, declared by
/// [`ParameterSpace::default`].
pub fn resolve<T: Sample>(descriptor: &TransformDescriptor) -> GfftResult<Arc<Pipeline<T>>> {
    T::transform_set().resolve(descriptor)
}

/// Shorthand for [`TransformSet::transform`] on the process-wide set of `T`.
pub fn transform<T: Sample>(
    len: usize,
    direction: Direction,
    domain: Domain,
    decimation: Decimation,
    placement: Placement,
) -> GfftResult<Arc<Pipeline<T>>> {
    T::transform_set().transform(len, direction, domain, decimation, placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn small_space() -> ParameterSpace {
        ParameterSpace::new().with_length_range(1..=12)
    }

    #[test]
    fn smooth_lengths() {
        let space = ParameterSpace::new().with_smooth_lengths(100);
        assert_eq!(
            space.lengths(),
            vec![1, 2, 3, 4, 6, 8, 9, 12, 16, 18, 24, 27, 32, 36, 48, 54, 64, 72, 81, 96]
        );
        assert_eq!(ParameterSpace::default().lengths().last(), Some(&DEFAULT_MAX_LEN));
    }

    #[test]
    fn power_lengths() {
        let space = ParameterSpace::new()
            .with_power_lengths(3, 1..=3)
            .with_power_lengths(2, 2..=3);
        assert_eq!(space.lengths(), vec![3, 4, 8, 9, 27]);
    }

    #[test]
    fn enumeration_skips_illegal() {
        // 1..=12 has 8 smooth lengths, 5 of them even
        let space = small_space();
        let per_shape = 2 * 2 * 2 * 2;
        assert_eq!(space.descriptors().len(), (8 + 5) * per_shape);
        assert!(space
            .descriptors()
            .iter()
            .all(|d| d.len() % 5 != 0 && d.len() % 7 != 0 && d.len() != 11));
    }

    #[test]
    fn set_keeps_own_precision() {
        let set = TransformSet::<f64>::new(&small_space());
        assert_eq!(set.declared_len(), (8 + 5) * 2 * 2 * 2);
        let single = TransformDescriptor::new(
            4,
            Precision::Single,
            Direction::Forward,
            Domain::Complex,
            Decimation::Time,
            Placement::InPlace,
        )
        .unwrap();
        assert!(!set.is_declared(&single));
        assert_eq!(
            set.resolve(&single).err(),
            Some(GfftError::UnregisteredConfiguration { descriptor: single })
        );
    }

    #[test]
    fn extended_is_never_served() {
        let set = TransformSet::<f64>::new(
            &small_space().with_precisions(vec![Precision::Double, Precision::Extended]),
        );
        let extended = TransformDescriptor::new(
            8,
            Precision::Extended,
            Direction::Inverse,
            Domain::Real,
            Decimation::Frequency,
            Placement::OutOfPlace,
        )
        .unwrap();
        assert!(matches!(
            set.resolve(&extended),
            Err(GfftError::UnregisteredConfiguration { .. })
        ));
    }

    #[test]
    fn unsupported_before_unregistered() {
        let set = TransformSet::<f32>::new(&small_space());
        assert_eq!(
            set.transform(5, Direction::Forward, Domain::Complex, Decimation::Time, Placement::InPlace)
                .err(),
            Some(GfftError::UnsupportedLength {
                len: 5,
                factor: Some(5)
            })
        );
        assert!(matches!(
            set.transform(16, Direction::Forward, Domain::Complex, Decimation::Time, Placement::InPlace),
            Err(GfftError::UnregisteredConfiguration { .. })
        ));
        assert_eq!(set.cached_len(), 0);
    }

    #[test]
    fn pipelines_are_cached() {
        let set = TransformSet::<f64>::new(&small_space());
        let a = set
            .transform(12, Direction::Forward, Domain::Real, Decimation::Time, Placement::InPlace)
            .unwrap();
        let b = set.resolve_id(a.descriptor().id()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(set.cached_len(), 1);

        // the real inverse of the same length reuses the core permutation
        let c = set
            .transform(12, Direction::Inverse, Domain::Real, Decimation::Time, Placement::InPlace)
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(set.cached_len(), 2);
        assert_eq!(lock(&set.tables.permutations).len(), 1);
    }

    #[test]
    fn tables_are_shared() {
        let tables = TableCache::<f64>::default();
        let a = tables.twiddle(16, Direction::Forward);
        let b = tables.twiddle(16, Direction::Forward);
        let c = tables.twiddle(16, Direction::Inverse);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        let p = tables.permutation(&[2, 3]);
        let q = tables.permutation(&[2, 3]);
        assert!(Arc::ptr_eq(&p, &q));
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let set = TransformSet::<f64>::new(&small_space());
        let pipelines = thread::scope(|s| {
            let handles = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        set.transform(
                            8,
                            Direction::Forward,
                            Domain::Complex,
                            Decimation::Frequency,
                            Placement::OutOfPlace,
                        )
                        .unwrap()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });
        assert!(pipelines.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(set.cached_len(), 1);
    }

    #[test]
    fn global_sets() {
        let desc = TransformDescriptor::new(
            4096,
            Precision::Single,
            Direction::Forward,
            Domain::Complex,
            Decimation::Time,
            Placement::InPlace,
        )
        .unwrap();
        let a = resolve::<f32>(&desc).unwrap();
        let b = resolve::<f32>(&desc).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(matches!(
            resolve::<f64>(&desc),
            Err(GfftError::UnregisteredConfiguration { .. })
        ));
    }
}
