//! Calendar identifiers: days, months, and half-year periods.
//!
//! | Type      | Text form  | Range                                 |
//! |-----------|------------|---------------------------------------|
//! | `DayId`   | `20240315` | one day                               |
//! | `MonthId` | `202403`   | 1st to last day of the month          |
//! | `Period`  | `2024S1`   | Jan 1 – Jun 30 (`S1`), Jul 1 – Dec 31 (`S2`) |
//!
//! All three parse from and display as their text form; `DayId` also
//! round-trips through its `u32` value, which is what the trip service uses.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ScheduleError, ScheduleResult};

// ── DayId ─────────────────────────────────────────────────────────────────────

/// A calendar day, written `yyyymmdd`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct DayId(NaiveDate);

impl DayId {
    pub fn new(date: NaiveDate) -> Self {
        DayId(date)
    }

    #[inline]
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// `yyyy × 10000 + mm × 100 + dd`.
    pub fn value(self) -> u32 {
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }
}

impl From<NaiveDate> for DayId {
    fn from(date: NaiveDate) -> Self {
        DayId(date)
    }
}

impl From<DayId> for u32 {
    fn from(day: DayId) -> u32 {
        day.value()
    }
}

impl TryFrom<u32> for DayId {
    type Error = ScheduleError;

    fn try_from(v: u32) -> ScheduleResult<Self> {
        let (year, month, day) = (v / 10_000, (v / 100) % 100, v % 100);
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .filter(|_| (1_000..=9_999).contains(&year))
            .map(DayId)
            .ok_or_else(|| ScheduleError::parse("day id", v.to_string()))
    }
}

impl FromStr for DayId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        let v = parse_digits(s, 8).ok_or_else(|| ScheduleError::parse("day id", s))?;
        DayId::try_from(v).map_err(|_| ScheduleError::parse("day id", s))
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.value())
    }
}

// ── MonthId ───────────────────────────────────────────────────────────────────

/// A calendar month, written `yyyymm`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthId {
    year: i32,
    month: u32,
}

impl MonthId {
    /// `None` unless `month` is 1–12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthId { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthId { year: date.year(), month: date.month() }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        ymd(self.year, self.month, 1)
    }

    pub fn last_day(self) -> NaiveDate {
        let (y, m) =
            if self.month == 12 { (self.year + 1, 1) } else { (self.year, self.month + 1) };
        ymd(y, m, 1).pred_opt().unwrap_or(NaiveDate::MAX)
    }
}

impl FromStr for MonthId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        let v = parse_digits(s, 6).ok_or_else(|| ScheduleError::parse("month id", s))?;
        MonthId::new((v / 100) as i32, v % 100).ok_or_else(|| ScheduleError::parse("month id", s))
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

// ── Period ────────────────────────────────────────────────────────────────────

/// Half of a year.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Half {
    /// January – June.
    S1,
    /// July – December.
    S2,
}

/// A half-year reporting period, written `yyyyS1` or `yyyyS2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub half: Half,
}

impl Period {
    pub fn new(year: i32, half: Half) -> Self {
        Period { year, half }
    }

    pub fn of(date: NaiveDate) -> Self {
        let half = if date.month() <= 6 { Half::S1 } else { Half::S2 };
        Period { year: date.year(), half }
    }

    pub fn first_day(self) -> NaiveDate {
        match self.half {
            Half::S1 => ymd(self.year, 1, 1),
            Half::S2 => ymd(self.year, 7, 1),
        }
    }

    pub fn last_day(self) -> NaiveDate {
        match self.half {
            Half::S1 => ymd(self.year, 6, 30),
            Half::S2 => ymd(self.year, 12, 31),
        }
    }
}

impl FromStr for Period {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        let err = || ScheduleError::parse("period", s);
        let (year, half) = s.split_at_checked(4).ok_or_else(err)?;
        let year = parse_digits(year, 4).ok_or_else(err)? as i32;
        let half = match half {
            "S1" => Half::S1,
            "S2" => Half::S2,
            _ => return Err(err()),
        };
        Ok(Period { year, half })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.half {
            Half::S1 => "S1",
            Half::S2 => "S2",
        };
        write!(f, "{:04}{half}", self.year)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse exactly `len` ASCII digits.
fn parse_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() == len && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// A date known to be valid: callers only pass month 1–12 and day 1,
/// or the fixed half-year boundaries.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
