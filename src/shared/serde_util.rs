//! Custom serde helpers for provider and journal wire formats.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Epoch values at or above this are read as milliseconds rather than seconds.
///
/// `10^11` seconds lies in the year 5138, while `10^11` milliseconds is March 1973.
pub const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Interpret an epoch value that may be seconds or milliseconds.
pub fn datetime_from_epoch(value: i64) -> Option<DateTime<Utc>> {
    // `checked_abs` is `None` only for `i64::MIN`, which is far past either threshold.
    if value.checked_abs().map_or(true, |abs| abs >= MILLIS_THRESHOLD) {
        DateTime::<Utc>::from_timestamp_millis(value)
    } else {
        DateTime::<Utc>::from_timestamp(value, 0)
    }
}

/// Parse RFC 3339 (`2024-01-15T10:00:00Z`) or naive ISO-8601 text, naive meaning UTC.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter for `DateTime<Utc>` that writes RFC 3339 and reads RFC 3339,
/// naive ISO-8601, or an epoch number (seconds or milliseconds).
pub mod flexible_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum RawInstant {
        Epoch(i64),
        Text(String),
    }

    impl RawInstant {
        pub(super) fn resolve<E: serde::de::Error>(self) -> Result<DateTime<Utc>, E> {
            match self {
                RawInstant::Epoch(v) => super::datetime_from_epoch(v)
                    .ok_or_else(|| E::custom(format!("Invalid timestamp: {}", v))),
                RawInstant::Text(s) => super::parse_datetime(&s)
                    .ok_or_else(|| E::custom(format!("Invalid timestamp: {}", s))),
            }
        }
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawInstant::deserialize(deserializer)?.resolve()
    }

    /// Same as the parent module, for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use super::RawInstant;
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<RawInstant>::deserialize(deserializer)? {
                Some(raw) => raw.resolve().map(Some),
                None => Ok(None),
            }
        }
    }
}
