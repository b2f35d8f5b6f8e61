use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATEPICKER_FORMAT: &str = "%Y-%m-%d";
const GREGORIAN: &str = "gregory";
const COMMON_ERA: &str = "AD";

/// `YYYY-MM-DD`, or an empty string when there is no date
pub fn format_date_for_datepicker(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATEPICKER_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn parse_datepicker(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATEPICKER_FORMAT).ok()
}

/// A stored date column: the date picker's `{calendar, era, year, month, day}`
/// object, or a `YYYY-MM-DD` string (a timestamp suffix is ignored).
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDate {
    Parts { year: i32, month: u32, day: u32 },
    Text(String),
}

impl StoredDate {
    fn into_date(self) -> Result<NaiveDate, String> {
        match self {
            StoredDate::Parts { year, month, day } => NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| format!("invalid date {}-{}-{}", year, month, day)),
            StoredDate::Text(text) => text
                .get(..10)
                .and_then(parse_datepicker)
                .ok_or_else(|| format!("invalid date '{}'", text)),
        }
    }
}

#[derive(Serialize)]
struct CalendarId {
    identifier: &'static str,
}

#[derive(Serialize)]
struct CalendarDate {
    calendar: CalendarId,
    era: &'static str,
    year: i32,
    month: u32,
    day: u32,
}

impl From<&NaiveDate> for CalendarDate {
    fn from(date: &NaiveDate) -> Self {
        Self {
            calendar: CalendarId { identifier: GREGORIAN },
            era: COMMON_ERA,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// `#[serde(with = "date_value")]` for required date columns
pub mod date_value {
    use super::{CalendarDate, StoredDate};
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        CalendarDate::from(date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        StoredDate::deserialize(deserializer)?
            .into_date()
            .map_err(D::Error::custom)
    }
}

/// Same as [`date_value`] for nullable columns
pub mod optional_date_value {
    use super::{CalendarDate, StoredDate};
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.as_ref().map(CalendarDate::from).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<StoredDate>::deserialize(deserializer)?
            .map(StoredDate::into_date)
            .transpose()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_date_for_datepicker() {
        assert_eq!(
            format_date_for_datepicker(NaiveDate::from_ymd_opt(2001, 2, 3)),
            "2001-02-03"
        );
        assert_eq!(format_date_for_datepicker(None), "");
    }

    #[test]
    fn test_parse_datepicker() {
        assert_eq!(parse_datepicker("2001-02-03"), NaiveDate::from_ymd_opt(2001, 2, 3));
        assert_eq!(parse_datepicker("03/02/2001"), None);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "date_value")]
        date: NaiveDate,
        #[serde(default, with = "optional_date_value")]
        birth: Option<NaiveDate>,
    }

    #[test]
    fn test_stored_date_accepts_picker_object_and_text() {
        let row: Row = serde_json::from_value(serde_json::json!({
            "date": {"calendar": {"identifier": "gregory"}, "era": "AD", "year": 2024, "month": 3, "day": 2},
            "birth": "1999-04-12T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(row.birth, NaiveDate::from_ymd_opt(1999, 4, 12));
    }

    #[test]
    fn test_stored_date_missing_or_null() {
        let row: Row = serde_json::from_value(serde_json::json!({"date": "2024-03-02", "birth": null})).unwrap();
        assert_eq!(row.birth, None);

        let row: Row = serde_json::from_value(serde_json::json!({"date": "2024-03-02"})).unwrap();
        assert_eq!(row.birth, None);
    }

    #[test]
    fn test_stored_date_written_as_picker_object() {
        let row = Row {
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            birth: None,
        };

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({
                "date": {"calendar": {"identifier": "gregory"}, "era": "AD", "year": 2024, "month": 3, "day": 2},
                "birth": null
            })
        );
    }

    #[test]
    fn test_stored_date_rejects_impossible_values() {
        let parts = serde_json::from_value::<Row>(serde_json::json!({"date": {"year": 2024, "month": 2, "day": 30}}));
        assert!(parts.is_err());
        assert!(serde_json::from_value::<Row>(serde_json::json!({"date": "soon"})).is_err());
    }
}
