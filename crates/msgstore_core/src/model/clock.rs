//! Time and identity sources injected into the message service.
//!
//! # Responsibility
//! - Abstract wall-clock reads and id generation behind small traits.
//! - Provide production implementations backed by the system clock and v4 UUIDs.
//!
//! # Invariants
//! - `SystemClock::now` never returns a value lower than a previous call in
//!   the same process.
//! - `UuidV4Generator` ids are drawn from a 122-bit random space.

use super::message::{MessageId, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static LAST_TICK: AtomicU64 = AtomicU64::new(0);

/// Source of "current time" for record stamping.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Source of fresh record identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> MessageId;
}

/// Process-monotonic epoch-nanosecond clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        // Strictly increasing within the process, even when the wall clock
        // stalls or steps backwards.
        let mut previous = LAST_TICK.load(Ordering::Relaxed);
        loop {
            let next = wall.max(previous.saturating_add(1));
            match LAST_TICK.compare_exchange_weak(
                previous,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(observed) => previous = observed,
            }
        }
    }
}

/// Random v4 UUID id source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> MessageId {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, IdGenerator, SystemClock, UuidV4Generator};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = SystemClock;
        let mut previous = clock.now();
        for _ in 0..1_000 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn uuid_generator_yields_parseable_unique_ids() {
        let ids = UuidV4Generator;
        let generated = (0..256).map(|_| ids.next_id()).collect::<HashSet<_>>();

        assert_eq!(generated.len(), 256);
        for id in &generated {
            let parsed = Uuid::parse_str(id).expect("generated id should be a uuid");
            assert_eq!(parsed.get_version_num(), 4);
        }
    }
}
