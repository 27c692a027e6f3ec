use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);
    };
}

id_newtype!(TalkId);

impl TalkId {
    /// Fragment id shared by the overview link and the detail block.
    pub fn anchor(self) -> String {
        self.0.to_string()
    }

    pub fn href(self) -> String {
        format!("#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Exact day name as written in the schedule file, surrounding blanks ignored.
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Weekday::ALL.into_iter().find(|day| day.as_str() == trimmed)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday '{0}'")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseWeekdayError(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    WeekdayTime,
    WeekdaySession,
    Name,
    Type,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::WeekdayTime,
        ViewMode::WeekdaySession,
        ViewMode::Name,
        ViewMode::Type,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::WeekdayTime => "Filter by Weekday & Time",
            ViewMode::WeekdaySession => "Filter by Weekday & Session",
            ViewMode::Name => "Filter by Name",
            ViewMode::Type => "Filter by Type, CT",
        }
    }

    /// Query-string value, identical to the serde name.
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::WeekdayTime => "weekday_time",
            ViewMode::WeekdaySession => "weekday_session",
            ViewMode::Name => "name",
            ViewMode::Type => "type",
        }
    }

    /// Day and session are constant within these results, so the overview omits them.
    pub fn groups_by_day(self) -> bool {
        matches!(self, ViewMode::WeekdayTime | ViewMode::WeekdaySession)
    }
}
