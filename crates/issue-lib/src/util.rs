//! ID generation and clock utilities.

use std::sync::Mutex;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use sha2::{Digest, Sha256};

use crate::model::ObjectId;

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for issue timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, truncated to milliseconds so stored values survive
/// the wire format unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start.trunc_subsecs(3)),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// ============================================================================
// ObjectId Generation
// ============================================================================

/// Produces [`ObjectId`]s: creation second, a per-generator 5-byte value,
/// then a 24-bit counter.
#[derive(Debug, Clone)]
pub struct ObjectIdGenerator {
    process_unique: [u8; 5],
    counter: u32,
}

impl ObjectIdGenerator {
    const COUNTER_MASK: u32 = 0x00ff_ffff;

    /// Seed from the process id and the current time.
    #[must_use]
    pub fn new() -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or(0);
        Self::with_seed(&format!("{}|{}", std::process::id(), nanos))
    }

    /// Deterministic generator for a given seed.
    #[must_use]
    pub fn with_seed(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());

        let mut process_unique = [0u8; 5];
        process_unique.copy_from_slice(&digest[..5]);
        let counter = u32::from_be_bytes([0, digest[5], digest[6], digest[7]]);

        Self {
            process_unique,
            counter,
        }
    }

    /// Generate the next id for an issue created at `at`.
    pub fn generate(&mut self, at: DateTime<Utc>) -> ObjectId {
        let secs = u32::try_from(at.timestamp()).unwrap_or(0);
        let count = self.counter & Self::COUNTER_MASK;
        self.counter = (self.counter + 1) & Self::COUNTER_MASK;

        let mut bytes = [0u8; ObjectId::LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        ObjectId::from_bytes(bytes)
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
