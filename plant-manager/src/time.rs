use jiff::{Timestamp, civil::Date, tz::TimeZone};
#[cfg(feature = "mock-time")]
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current time, used for form defaults and for timestamps
/// assigned by the local backend.
///
/// With the `mock-time` feature a source can also be frozen at a chosen
/// instant and moved by hand, so "today" is deterministic in tests.
#[derive(Debug, Clone, Default)]
pub struct TimeSource {
    #[cfg(feature = "mock-time")]
    mocked: Option<Arc<Mutex<Timestamp>>>,
}

impl TimeSource {
    /// Follows the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "mock-time")]
    pub fn mock(initial_time: Timestamp) -> Self {
        Self {
            mocked: Some(Arc::new(Mutex::new(initial_time))),
        }
    }

    #[cfg(not(feature = "mock-time"))]
    pub fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    #[cfg(feature = "mock-time")]
    pub fn now(&self) -> Timestamp {
        match &self.mocked {
            Some(time) => *time.lock().unwrap_or_else(PoisonError::into_inner),
            None => Timestamp::now(),
        }
    }

    /// Move a mocked clock forward. No effect on the system clock.
    #[cfg(feature = "mock-time")]
    pub fn advance(&self, duration: jiff::Span) {
        if let Some(time) = &self.mocked {
            let mut time = time.lock().unwrap_or_else(PoisonError::into_inner);
            *time = time.checked_add(duration).unwrap_or(*time);
        }
    }

    #[cfg(feature = "mock-time")]
    pub fn set(&self, new_time: Timestamp) {
        if let Some(time) = &self.mocked {
            *time.lock().unwrap_or_else(PoisonError::into_inner) = new_time;
        }
    }

    /// The current calendar date in UTC, the date part of an ISO 8601
    /// timestamp.
    pub fn today(&self) -> Date {
        self.now().to_zoned(TimeZone::UTC).date()
    }
}
