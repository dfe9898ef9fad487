// Error types shared by the library modules. Every failure is surfaced to
// the immediate caller; nothing here is retried or recovered locally.

use chrono::NaiveDateTime;
use std::fmt;

/// Which side of a daylight-saving transition a local time landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstTransition {
    /// The local time occurs twice (clocks were set back).
    Fold,
    /// The local time never occurs (clocks were set forward).
    Gap,
}

impl fmt::Display for DstTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DstTransition::Fold => f.write_str("ambiguous (DST fold)"),
            DstTransition::Gap => f.write_str("nonexistent (DST gap)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure, timeout, or a non-2xx status on entry retrieval.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unknown timezone: {0:?}")]
    UnknownTimezone(String),

    #[error("local time {local} is {transition} in timezone {timezone}")]
    AmbiguousLocalTime {
        local: NaiveDateTime,
        timezone: String,
        transition: DstTransition,
    },

    /// Body was expected to be JSON but did not parse.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Empty, `.` or `..`; none of these name a single entry.
    #[error("invalid time entry id: {0:?}")]
    InvalidEntryId(String),

    #[error("access token contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
