use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month at which a class window was last rotated.
///
/// `month` is zero-based (January = 0). Tags written before years were
/// recorded deserialize from a bare integer and carry `year: None`; such a tag
/// compares by month alone until the next rotation stamps a year on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonthTag")]
pub struct MonthTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub month: u32,
}

impl MonthTag {
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        (month0 < 12).then_some(Self {
            year: Some(year),
            month: month0,
        })
    }

    pub fn legacy(month0: u32) -> Option<Self> {
        (month0 < 12).then_some(Self {
            year: None,
            month: month0,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: date.month0(),
        }
    }

    /// True when no rotation is due for a window tagged `self` on `today`.
    pub fn matches(&self, today: &MonthTag) -> bool {
        if self.month != today.month {
            return false;
        }
        match (self.year, today.year) {
            (Some(stored), Some(now)) => stored == now,
            _ => true,
        }
    }
}

impl fmt::Display for MonthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:04}-{:02}", year, self.month + 1),
            None => write!(f, "month {:02}", self.month + 1),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMonthTag {
    Legacy(u32),
    Qualified {
        #[serde(default)]
        year: Option<i32>,
        month: u32,
    },
}

impl TryFrom<RawMonthTag> for MonthTag {
    type Error = String;

    fn try_from(raw: RawMonthTag) -> Result<Self, Self::Error> {
        let (year, month) = match raw {
            RawMonthTag::Legacy(month) => (None, month),
            RawMonthTag::Qualified { year, month } => (year, month),
        };
        if month > 11 {
            return Err(format!("month index {} is outside 0..=11", month));
        }
        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_date_uses_zero_based_month() {
        let tag = MonthTag::from_date(date(2024, 5, 17));
        assert_eq!(tag, MonthTag::new(2024, 4).unwrap());
        assert_eq!(tag.to_string(), "2024-05");
    }

    #[test]
    fn same_month_next_year_does_not_match() {
        let stored = MonthTag::new(2023, 4).unwrap();
        let today = MonthTag::new(2024, 4).unwrap();
        assert!(!stored.matches(&today));
        assert!(stored.matches(&stored));
    }

    #[test]
    fn legacy_tag_matches_by_month_only() {
        let stored = MonthTag::legacy(4).unwrap();
        assert!(stored.matches(&MonthTag::new(2031, 4).unwrap()));
        assert!(!stored.matches(&MonthTag::new(2031, 5).unwrap()));
    }

    #[test]
    fn deserializes_bare_integer_and_object_forms() {
        let legacy: MonthTag = serde_json::from_str("7").unwrap();
        assert_eq!(legacy, MonthTag::legacy(7).unwrap());

        let qualified: MonthTag = serde_json::from_str(r#"{"year":2024,"month":0}"#).unwrap();
        assert_eq!(qualified, MonthTag::new(2024, 0).unwrap());

        assert!(serde_json::from_str::<MonthTag>("12").is_err());
    }

    #[test]
    fn rejects_out_of_range_constructors() {
        assert!(MonthTag::new(2024, 12).is_none());
        assert!(MonthTag::legacy(12).is_none());
    }
}
