//! Identifier generation.
//!
//! Rule uids, conditional-format ids, sheet ids and workbook ids are drawn from an injected
//! [`IdGenerator`] so that tests (and reproducible CLI runs) can supply deterministic ids.

use rand::distr::Alphanumeric;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng as _};

/// Length of generated ids, matching Univer's `generateRandomId(6)`.
pub const DEFAULT_ID_LEN: usize = 6;

/// Source of opaque, fixed-length identifiers.
pub trait IdGenerator {
    /// Produce a new identifier of `len` characters.
    fn generate(&mut self, len: usize) -> String;
}

/// Alphanumeric ids drawn from a random number generator.
#[derive(Debug)]
pub struct RandomIdGenerator<R = ThreadRng> {
    rng: R,
}

impl RandomIdGenerator<ThreadRng> {
    /// Ids drawn from the thread-local RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomIdGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomIdGenerator<StdRng> {
    /// Reproducible ids: the same seed yields the same id sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> IdGenerator for RandomIdGenerator<R> {
    fn generate(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Zero-padded decimal counter (`000001`, `000002`, ...).
///
/// Ids grow past `len` characters once the counter needs more digits.
#[derive(Clone, Debug, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `next` instead of 1.
    pub fn starting_at(next: u64) -> Self {
        Self {
            next: next.saturating_sub(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self, len: usize) -> String {
        self.next += 1;
        format!("{:0>len$}", self.next)
    }
}
