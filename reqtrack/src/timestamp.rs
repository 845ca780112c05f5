use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use std::fmt;

/// Point in time at which a request started or settled.
///
/// Renders as ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2026-10-19T08:15:30.042Z`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Time elapsed from `earlier` to `self`; negative if `earlier` is later.
    pub fn since(&self, earlier: &Timestamp) -> TimeDelta {
        self.0 - earlier.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_rendering() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap();
        let ts = Timestamp::from(at + TimeDelta::milliseconds(42));
        assert_eq!(ts.to_iso_string(), "2026-10-19T08:15:30.042Z");
        assert_eq!(ts.to_string(), ts.to_iso_string());
    }

    #[test]
    fn test_ordering() {
        let start = Timestamp::now();
        let end = Timestamp::now();
        assert!(start <= end);
        assert!(end.since(&start) >= TimeDelta::zero());
    }
}
