//! Diversity-aware random picking — avoids values emitted within a sliding
//! window of recent picks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::marker::PhantomData;
use thiserror::Error;

/// Default number of recent picks remembered per field.
pub const DEFAULT_RECENT_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("options array must not be empty")]
    EmptyOptions,
}

/// Pick a random element of `options` that is not in `recent`.
///
/// When every option appears in `recent` the history is ignored and the pick
/// is drawn from the full pool, so saturation never causes a failure.
/// Membership uses `PartialEq`.
pub fn pick<'a, T, R>(options: &'a [T], recent: &[T], rng: &mut R) -> Result<&'a T, PickError>
where
    T: PartialEq,
    R: Rng + ?Sized,
{
    if options.is_empty() {
        return Err(PickError::EmptyOptions);
    }

    let candidates: Vec<&T> = options
        .iter()
        .filter(|item| !recent.contains(*item))
        .collect();

    let picked = match candidates.choose(rng) {
        Some(item) => *item,
        None => {
            tracing::debug!(
                options = options.len(),
                recent = recent.len(),
                "recent window covers every option, picking from the full pool"
            );
            options.choose(rng).ok_or(PickError::EmptyOptions)?
        }
    };
    Ok(picked)
}

/// Append `value` to `recent`, keeping at most `max_size` of the newest
/// entries. A `max_size` of zero always yields an empty history.
pub fn push_recent<T: Clone>(recent: &[T], value: T, max_size: usize) -> Vec<T> {
    let mut next = Vec::with_capacity(recent.len() + 1);
    next.extend_from_slice(recent);
    next.push(value);
    if next.len() > max_size {
        next.drain(..next.len() - max_size);
    }
    next
}

/// The result of [`pick_with_history`]: the chosen value and the history
/// that should be passed to the next call.
#[derive(Debug, Clone, PartialEq)]
pub struct Picked<T> {
    pub value: T,
    pub recent: Vec<T>,
}

/// Pick and record in one step.
pub fn pick_with_history<T, R>(
    options: &[T],
    recent: &[T],
    max_size: usize,
    rng: &mut R,
) -> Result<Picked<T>, PickError>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    let value = pick(options, recent, rng)?.clone();
    let recent = push_recent(recent, value.clone(), max_size);
    Ok(Picked { value, recent })
}

/// A stateful picker that keeps a separate recent window per field key.
///
/// Histories never leak between keys. An instance is meant for one caller
/// (one session, one request); give concurrent callers their own.
#[derive(Debug, Clone)]
pub struct DiversePicker<T = String> {
    window_size: usize,
    history: FxHashMap<String, Vec<T>>,
    rng: StdRng,
}

/// Builder for a [`DiversePicker`].
#[derive(Debug)]
pub struct DiversePickerBuilder<T = String> {
    window_size: usize,
    seed: Option<u64>,
    _values: PhantomData<fn() -> T>,
}

impl<T> DiversePickerBuilder<T> {
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Seed the random source. Without a seed the picker draws from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> DiversePicker<T> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        DiversePicker {
            window_size: self.window_size,
            history: FxHashMap::default(),
            rng,
        }
    }
}

impl<T> DiversePicker<T> {
    pub fn builder() -> DiversePickerBuilder<T> {
        DiversePickerBuilder {
            window_size: DEFAULT_RECENT_WINDOW,
            seed: None,
            _values: PhantomData,
        }
    }

    pub fn new(window_size: usize) -> Self {
        Self::builder().window_size(window_size).build()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Recent picks for `field_key`, oldest first.
    pub fn history(&self, field_key: &str) -> &[T] {
        self.history
            .get(field_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Forget every field's history.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl<T: PartialEq + Clone> DiversePicker<T> {
    /// Pick a value for `field_key`, avoiding that field's recent picks.
    pub fn pick(&mut self, field_key: &str, options: &[T]) -> Result<T, PickError> {
        let recent = self.history.get(field_key).map(Vec::as_slice).unwrap_or_default();
        let Picked { value, recent } =
            pick_with_history(options, recent, self.window_size, &mut self.rng)?;
        tracing::trace!(field = field_key, window = recent.len(), "picked value");
        self.history.insert(field_key.to_string(), recent);
        Ok(value)
    }
}

impl<T> Default for DiversePicker<T> {
    fn default() -> Self {
        Self::builder().build()
    }
}
