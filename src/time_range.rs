// Time-range URL construction. Turns a local wall-clock interval plus an
// IANA zone name into the UTC path segment the time-entries endpoint
// expects, e.g. `time-entries/2023-03-30T04:00:00.000/2023-03-31T04:00:00.000`.

use crate::error::{DstTransition, Error, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Base URL of the public Timeular API.
pub const DEFAULT_BASE_URL: &str = "https://api.timeular.com/api/v3";

/// Zone the command-line front-end falls back to when none is given.
/// Library functions never apply it on their own.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// `YYYY-MM-DDTHH:MM:SS.mmm`; `%.3f` truncates the fraction.
const UTC_MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A local interval resolved to UTC instants.
///
/// `start > end` is accepted as-is; ordering is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    timezone: Tz,
}

impl TimeRange {
    /// Attach `timezone` to both naive timestamps and convert them to UTC.
    ///
    /// Fails with [`Error::UnknownTimezone`] if the name is not in the IANA
    /// database and with [`Error::AmbiguousLocalTime`] if either timestamp
    /// falls into a DST fold or gap. No guessing happens in either case.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, timezone: &str) -> Result<Self> {
        let tz = resolve_timezone(timezone)?;
        Ok(TimeRange {
            start: localize(tz, start)?,
            end: localize(tz, end)?,
            timezone: tz,
        })
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Path relative to the API base, without a leading slash.
    pub fn path(&self) -> String {
        format!(
            "time-entries/{}/{}",
            format_utc_millis(self.start),
            format_utc_millis(self.end)
        )
    }
}

/// Render a UTC instant with exactly three fractional digits, truncated.
pub fn format_utc_millis(instant: DateTime<Utc>) -> String {
    instant.format(UTC_MILLIS_FORMAT).to_string()
}

/// Build the absolute URL for listing entries between two local timestamps.
pub fn entry_by_timestamp_url(
    base_url: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    timezone: &str,
) -> Result<String> {
    let range = TimeRange::new(start, end, timezone)?;
    log::info!(
        "Constructing URL for entries between {} and {} in timezone {}",
        start,
        end,
        timezone
    );
    Ok(format!("{}/{}", base_url.trim_end_matches('/'), range.path()))
}

fn resolve_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(name.to_string()))
}

fn localize(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    let transition = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => return Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, _) => DstTransition::Fold,
        LocalResult::None => DstTransition::Gap,
    };
    Err(Error::AmbiguousLocalTime {
        local,
        timezone: tz.name().to_string(),
        transition,
    })
}
