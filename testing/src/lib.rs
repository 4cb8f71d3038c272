//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits (clocks, id generators)
//! - A Given-When-Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddItem { text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.count(), 1))
//!     .run();
//! ```

/// Fluent reducer tests
pub mod reducer_test;

/// Deterministic implementations of environment traits
pub mod mocks {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;
    use tasklist_core::environment::{Clock, IdGenerator};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the environment under test.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use tasklist_core::environment::Clock;
    /// use tasklist_testing::{test_time, ManualClock};
    ///
    /// let clock = ManualClock::new(test_time());
    /// let start = clock.now();
    /// clock.advance(Duration::from_millis(150));
    /// assert_eq!((clock.now() - start).num_milliseconds(), 150);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock stopped at `time`
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        ///
        /// # Panics
        ///
        /// Panics if the resulting time overflows the representable range.
        pub fn advance(&self, by: Duration) {
            if let Ok(delta) = chrono::Duration::from_std(by) {
                let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
                *time += delta;
            }
        }

        /// Jump to an absolute time
        pub fn set(&self, to: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = to;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Clock that follows tokio's time
    ///
    /// Under `#[tokio::test(start_paused = true)]` tokio's clock only moves as
    /// timers fire, which makes effect-driven timelines (animation frames)
    /// deterministic while still running through a real `Store`.
    #[derive(Debug, Clone)]
    pub struct TokioClock {
        base: DateTime<Utc>,
        start: tokio::time::Instant,
    }

    impl TokioClock {
        /// Anchor `base` to tokio's current instant
        #[must_use]
        pub fn new(base: DateTime<Utc>) -> Self {
            Self {
                base,
                start: tokio::time::Instant::now(),
            }
        }
    }

    impl Clock for TokioClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = chrono::Duration::from_std(self.start.elapsed())
                .unwrap_or_else(|_| chrono::Duration::zero());
            self.base + elapsed
        }
    }

    /// Predictable identifiers: `00000000-…-0001`, `…-0002`, …
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_core::environment::IdGenerator;
    /// use tasklist_testing::SequentialIdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Start counting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::SeqCst)))
        }
    }

    /// The instant every test clock starts at (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }

    /// Create a default fixed clock for tests
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_time())
    }
}

// Re-export commonly used items
pub use mocks::{
    FixedClock, ManualClock, SequentialIdGenerator, TokioClock, test_clock, test_time,
};
pub use reducer_test::{ReducerTest, assertions};
