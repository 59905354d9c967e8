use chrono::NaiveDateTime;

/// Datetime layout used on the wire, e.g. `10/01/2022, 09:15:00`.
pub const WIRE_DATETIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Strictly parse a wire datetime. Any other layout is rejected.
pub fn parse_wire_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, WIRE_DATETIME_FORMAT)
}

pub fn format_wire_datetime(value: &NaiveDateTime) -> String {
    value.format(WIRE_DATETIME_FORMAT).to_string()
}

/// `#[serde(with = "wire_format")]` adapter for `NaiveDateTime` fields.
pub mod wire_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_datetime(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_datetime(&raw).map_err(|e| {
            de::Error::custom(format!(
                "invalid datetime '{}', expected MM/DD/YYYY, HH:MM:SS: {}",
                raw, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(with = "wire_format")]
        at: NaiveDateTime,
    }

    #[test]
    fn parses_wire_layout() {
        let parsed = parse_wire_datetime("10/01/2022, 09:45:30").unwrap();
        let expected = NaiveDate::from_ymd_opt(2022, 10, 1)
            .unwrap()
            .and_hms_opt(9, 45, 30)
            .unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(format_wire_datetime(&parsed), "10/01/2022, 09:45:30");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_wire_datetime("2022-10-01T09:45:30").is_err());
        assert!(parse_wire_datetime("10/01/2022 09:45:30").is_err());
        assert!(parse_wire_datetime("10/01/2022, 09:45").is_err());
        assert!(parse_wire_datetime("13/01/2022, 09:45:00").is_err());
        assert!(parse_wire_datetime("").is_err());
    }

    #[test]
    fn serde_adapter_reports_bad_input() {
        let ok: Payload = serde_json::from_str(r#"{"at": "01/31/2023, 23:15:00"}"#).unwrap();
        assert_eq!(ok.at.minute(), 15);

        let err = serde_json::from_str::<Payload>(r#"{"at": "31/01/2023"}"#).unwrap_err();
        assert!(err.to_string().contains("expected MM/DD/YYYY, HH:MM:SS"));
    }
}
