//! Date handling.
//!
//! Dates cross the HTTP boundary as `dd-MM-yyyy` and are stored as ISO
//! `yyyy-MM-dd` so that SQL equality and ordering behave.

use chrono::NaiveDate;

/// Wire format, e.g. `31-12-2024`.
pub const WIRE_FORMAT: &str = "%d-%m-%Y";

/// Storage format, e.g. `2024-12-31`.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `dd-MM-yyyy` string.
pub fn parse_wire(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), WIRE_FORMAT)
}

pub fn format_wire(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

pub fn parse_storage(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, STORAGE_FORMAT)
}

pub fn format_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDate>` fields in the wire models.
///
/// `null`, a missing field, and `""` all read as `None`.
pub mod wire_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&super::format_wire(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_wire(s)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}', expected dd-MM-yyyy: {e}"))),
        }
    }
}
