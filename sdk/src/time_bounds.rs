//! Time window during which a transaction may be included in a ledger.
//!
//! Both ends are UNIX timestamps in seconds. A `max_time` of 0 means the
//! window has no upper end.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TIMEOUT_INFINITE;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeBoundsError {
    #[error("min_time {min_time} is after max_time {max_time}")]
    MinAfterMax { min_time: u64, max_time: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    pub fn new(min_time: u64, max_time: u64) -> Result<Self, TimeBoundsError> {
        if max_time != TIMEOUT_INFINITE && min_time > max_time {
            return Err(TimeBoundsError::MinAfterMax { min_time, max_time });
        }
        Ok(Self { min_time, max_time })
    }

    /// Valid from now until `seconds` from now.
    pub fn with_timeout(seconds: u64) -> Self {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        Self {
            min_time: 0,
            max_time: now.saturating_add(seconds),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            min_time: 0,
            max_time: TIMEOUT_INFINITE,
        }
    }

    /// Whether `timestamp` falls inside the window.
    pub fn contains(&self, timestamp: u64) -> bool {
        timestamp >= self.min_time
            && (self.max_time == TIMEOUT_INFINITE || timestamp <= self.max_time)
    }
}

impl XdrEncode for TimeBounds {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_u64(self.min_time);
        writer.write_u64(self.max_time);
        Ok(())
    }
}

impl XdrDecode for TimeBounds {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            min_time: reader.read_u64()?,
            max_time: reader.read_u64()?,
        })
    }
}
