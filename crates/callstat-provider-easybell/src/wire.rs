//! Wire format of the call log endpoint
//!
//! The endpoint answers with `{"last_page": <int>, "data": [<record>...]}`.
//! Record fields use the remote (German) schema names. `DATUM` is a local
//! wall-clock time in `DD.MM.YYYY HH:MM:SS` form and `DAUER` is a count of
//! seconds.

use callstat_core::source::CallLogPage;
use callstat_core::types::{CallDirection, CallKind, CallLogEntry, CallType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Timestamp format of the `DATUM` field
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Page envelope as sent by the server
#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    last_page: Option<u32>,
    #[serde(default)]
    data: Option<Vec<RawCallLogEntry>>,
}

/// One record as sent by the server
#[derive(Debug, Deserialize)]
struct RawCallLogEntry {
    #[serde(rename = "ID", default, deserialize_with = "nullable_string")]
    id: String,
    #[serde(rename = "DELETED", default, deserialize_with = "nullable_string")]
    deleted: String,
    #[serde(rename = "DATUM", deserialize_with = "remote_timestamp")]
    time: NaiveDateTime,
    #[serde(rename = "DAUER")]
    duration_secs: u64,
    #[serde(rename = "RUFNUMMER", default, deserialize_with = "nullable_string")]
    number: String,
    #[serde(rename = "RICHTUNG", default, deserialize_with = "nullable_string")]
    direction: String,
    #[serde(rename = "PARTNER", default, deserialize_with = "nullable_string")]
    partner: String,
    #[serde(rename = "TYPE", default, deserialize_with = "nullable_string")]
    call_type: String,
    #[serde(rename = "STATUS", default, deserialize_with = "nullable_string")]
    status: String,
    #[serde(rename = "ART", default, deserialize_with = "nullable_string")]
    kind: String,
    #[serde(rename = "FAXSTATUS", default, deserialize_with = "nullable_string")]
    fax_status: String,
    #[serde(rename = "FAXERRORREASON", default, deserialize_with = "nullable_string")]
    fax_error_reason: String,
}

impl From<RawCallLogEntry> for CallLogEntry {
    fn from(raw: RawCallLogEntry) -> Self {
        Self {
            id: raw.id,
            deleted: raw.deleted,
            time: raw.time,
            duration: Duration::from_secs(raw.duration_secs),
            number: raw.number,
            direction: CallDirection::from(raw.direction),
            partner: raw.partner,
            call_type: CallType::from(raw.call_type),
            status: raw.status,
            kind: CallKind::from(raw.kind),
            fax_status: raw.fax_status,
            fax_error_reason: raw.fax_error_reason,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn remote_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).map_err(serde::de::Error::custom)
}

/// Parse a `DATUM` value
///
/// # Examples
/// ```
/// use callstat_provider_easybell::wire::parse_timestamp;
///
/// let ts = parse_timestamp("05.03.2024 14:07:09").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-05 14:07:09");
/// assert!(parse_timestamp("2024-03-05 14:07:09").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp '{value}': {e}"))
}

/// Decode one response body into a page
pub fn decode_page(body: &[u8]) -> Result<CallLogPage, serde_json::Error> {
    let raw: RawPage = serde_json::from_slice(body)?;
    Ok(CallLogPage {
        last_page: raw.last_page.unwrap_or(0),
        entries: raw
            .data
            .unwrap_or_default()
            .into_iter()
            .map(CallLogEntry::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "ID": "4711",
            "DELETED": "0",
            "DATUM": "31.01.2024 23:59:58",
            "DAUER": 754,
            "RUFNUMMER": "04012345",
            "RICHTUNG": "11",
            "PARTNER": "01701234567",
            "TYPE": "call",
            "STATUS": "answered",
            "ART": "mobile",
            "FAXSTATUS": "",
            "FAXERRORREASON": null
        })
    }

    #[test]
    fn test_decode_full_record() {
        let body = json!({"last_page": 3, "data": [record()]}).to_string();
        let page = decode_page(body.as_bytes()).unwrap();

        assert_eq!(page.last_page, 3);
        assert_eq!(page.entries.len(), 1);
        let entry = &page.entries[0];
        assert_eq!(entry.id, "4711");
        assert_eq!(entry.duration, Duration::from_secs(754));
        assert_eq!(entry.direction, CallDirection::SuccessfulOutbound);
        assert_eq!(entry.call_type, CallType::Regular);
        assert_eq!(entry.kind, CallKind::Mobile);
        assert_eq!(entry.fax_error_reason, "");
        assert_eq!(entry.time.to_string(), "2024-01-31 23:59:58");
    }

    #[test]
    fn test_missing_envelope_fields_default() {
        let page = decode_page(b"{}").unwrap();
        assert_eq!(page.last_page, 0);
        assert!(page.entries.is_empty());

        let page = decode_page(br#"{"last_page": null, "data": null}"#).unwrap();
        assert_eq!(page.last_page, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let mut raw = record();
        raw["ART"] = json!("special");
        let body = json!({"last_page": 1, "data": [raw]}).to_string();
        let page = decode_page(body.as_bytes()).unwrap();
        assert_eq!(page.entries[0].kind, CallKind::Other("special".to_string()));
    }

    #[test]
    fn test_rejects_iso_timestamp() {
        let mut raw = record();
        raw["DATUM"] = json!("2024-01-31T23:59:58");
        let body = json!({"last_page": 1, "data": [raw]}).to_string();
        let err = decode_page(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_rejects_negative_duration() {
        let mut raw = record();
        raw["DAUER"] = json!(-5);
        let body = json!({"last_page": 1, "data": [raw]}).to_string();
        assert!(decode_page(body.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(decode_page(b"<html>login</html>").is_err());
    }
}
