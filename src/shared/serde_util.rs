//! Custom serde helpers for gateway wire formats.
//!
//! IG timestamps are local-exchange wall-clock times in two non-ISO layouts:
//! deal timestamps like `2021/02/10 11:42:56:000` (milliseconds after a
//! colon) and price snapshot times like `2021/02/10 12:00:00`.

/// `%Y/%m/%d %H:%M:%S:%3f` — deal timestamps (`createdDate`).
pub mod deal_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y/%m/%d %H:%M:%S:%3f";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid deal timestamp {s:?}: {e}")))
    }
}

/// `%Y/%m/%d %H:%M:%S` — price snapshot times (`snapshotTime`).
pub mod snapshot_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y/%m/%d %H:%M:%S";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid snapshot time {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Deal {
        #[serde(with = "super::deal_timestamp")]
        created: NaiveDateTime,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        #[serde(with = "super::snapshot_timestamp")]
        time: NaiveDateTime,
    }

    #[test]
    fn test_deal_timestamp_round_trip() {
        let json = r#"{"created":"2021/02/10 11:42:56:000"}"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 2, 10)
            .unwrap()
            .and_hms_opt(11, 42, 56)
            .unwrap();
        assert_eq!(deal.created, expected);
        assert_eq!(serde_json::to_string(&deal).unwrap(), json);
    }

    #[test]
    fn test_snapshot_timestamp_round_trip() {
        let json = r#"{"time":"2021/02/10 12:00:00"}"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 2, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(snap.time, expected);
        assert_eq!(serde_json::to_string(&snap).unwrap(), json);
    }

    #[test]
    fn test_deal_timestamp_rejects_iso() {
        let json = r#"{"created":"2021-02-10T11:42:56Z"}"#;
        assert!(serde_json::from_str::<Deal>(json).is_err());
    }
}
