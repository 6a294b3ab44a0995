//! Calendar: date-range validation, month arithmetic, and the per-day
//! reduction of raw entries into [`DayMood`]s.

pub mod handlers;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::entry::{DayMood, MoodEntry};
use crate::spectrum::{average_colors, HslColor};

/// `YYYY-MM-DD`, checked before any parsing.
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

/// Parses a `YYYY-MM-DD` date. `field` names the input in the error message.
pub fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    if !ISO_DATE_RE.is_match(value) {
        return Err(AppError::Validation(format!(
            "{field} must be a date in YYYY-MM-DD format"
        )));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} is not a valid calendar date")))
}

/// Inclusive date range; construct it through [`DateRange::new`] or [`DateRange::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::Validation(
                "start must not be after end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Validates raw query strings before any store is consulted.
    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        Self::new(parse_iso_date("start", start)?, parse_iso_date("end", end)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar month; `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // Rejects month 0/13 and years chrono cannot represent.
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1).map(|d| d - Duration::days(1))
    }

    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange {
            start: self.first_day()?,
            end: self.last_day()?,
        })
    }
}

/// Groups entries by date, one [`DayMood`] per day in ascending date order.
///
/// The dominant color is the circular mean of the day's colors; the level is
/// the one recorded on the most recently created entry. Entries within a day
/// are ordered by creation time.
pub fn aggregate_days(entries: Vec<MoodEntry>) -> Vec<DayMood> {
    let mut by_day: BTreeMap<NaiveDate, Vec<MoodEntry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.date).or_default().push(entry);
    }

    by_day
        .into_iter()
        .filter_map(|(date, mut day_entries)| {
            day_entries.sort_by_key(|e| e.created_at);
            let latest = day_entries.last()?;
            let energy_level = latest.energy_level;
            let colors: Vec<HslColor> = day_entries.iter().map(|e| e.color).collect();

            Some(DayMood {
                date,
                dominant_color: average_colors(&colors),
                energy_level,
                entry_count: day_entries.len(),
                entries: day_entries,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::NewEntry;
    use crate::spectrum::{energy_to_color, EnergyLevel};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(day: &str, energy: f64, created_minute: u32) -> MoodEntry {
        MoodEntry::from_new(
            Uuid::new_v4(),
            Uuid::nil(),
            NewEntry {
                text: format!("entry at {created_minute}"),
                date: date(day),
                color: energy_to_color(energy),
                energy,
                ai_generated: true,
                reasoning: None,
            },
            Utc.with_ymd_and_hms(2026, 3, 1, 9, created_minute, 0).unwrap(),
        )
    }

    #[test]
    fn test_parse_iso_date_accepts_valid() {
        assert_eq!(parse_iso_date("start", "2026-02-28").unwrap(), date("2026-02-28"));
    }

    #[test]
    fn test_parse_iso_date_rejects_malformed() {
        for bad in ["2026-2-28", "26-02-28", "2026/02/28", "2026-02-28T00:00", "", " 2026-02-28"] {
            assert!(parse_iso_date("start", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert!(parse_iso_date("end", "2026-02-30").is_err());
        assert!(parse_iso_date("end", "2026-13-01").is_err());
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        assert!(DateRange::parse("2026-03-10", "2026-03-01").is_err());
        let single = DateRange::parse("2026-03-10", "2026-03-10").unwrap();
        assert!(single.contains(date("2026-03-10")));
        assert!(!single.contains(date("2026-03-11")));
    }

    #[test]
    fn test_month_bounds() {
        let feb = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(feb.first_day().unwrap(), date("2024-02-01"));
        assert_eq!(feb.last_day().unwrap(), date("2024-02-29"));

        let dec = CalendarMonth::new(2025, 12).unwrap();
        assert_eq!(dec.last_day().unwrap(), date("2025-12-31"));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let jan = CalendarMonth::new(2026, 1).unwrap();
        assert_eq!(jan.previous(), CalendarMonth { year: 2025, month: 12 });
        assert_eq!(jan.previous().next(), jan);
        assert_eq!(
            CalendarMonth::new(2025, 12).unwrap().next(),
            CalendarMonth { year: 2026, month: 1 }
        );
    }

    #[test]
    fn test_month_rejects_invalid() {
        assert!(CalendarMonth::new(2026, 0).is_none());
        assert!(CalendarMonth::new(2026, 13).is_none());
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_days(vec![]).is_empty());
    }

    #[test]
    fn test_aggregate_groups_by_day_in_date_order() {
        let days = aggregate_days(vec![
            entry("2026-03-05", 0.5, 1),
            entry("2026-03-02", 0.1, 2),
            entry("2026-03-05", 0.5, 3),
        ]);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date("2026-03-02"));
        assert_eq!(days[0].entry_count, 1);
        assert_eq!(days[1].date, date("2026-03-05"));
        assert_eq!(days[1].entry_count, 2);
        assert_eq!(days[1].dominant_color, energy_to_color(0.5));
    }

    #[test]
    fn test_aggregate_level_comes_from_latest_entry() {
        let days = aggregate_days(vec![
            entry("2026-03-05", 0.9, 30),
            entry("2026-03-05", 0.1, 10),
        ]);
        assert_eq!(days[0].energy_level, EnergyLevel::High);
        assert_eq!(days[0].entries[0].energy_value, 0.1);
        assert_eq!(days[0].entries[1].energy_value, 0.9);
    }

    #[test]
    fn test_aggregate_single_entry_keeps_its_color() {
        let days = aggregate_days(vec![entry("2026-03-05", 0.33, 0)]);
        assert_eq!(days[0].dominant_color, energy_to_color(0.33));
    }
}
