use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{fs, io::Read, path::Path, sync::Arc};
use tracing::{debug, info, warn};

use shared::domain::{TalkId, Weekday};

pub mod catalog;

pub const WEEKDAY_COLUMN: &str = "WEEKDAY";
pub const START_COLUMN: &str = "START_STR";
pub const END_COLUMN: &str = "END_STR";
pub const SESSION_COLUMN: &str = "SESSION";
pub const NAME_COLUMN: &str = "FULL_NAME";
pub const TYPE_COLUMN: &str = "TYPE";
pub const ROOM_COLUMN: &str = "ROOM";
pub const TITLE_COLUMN: &str = "TITLE";
pub const ABSTRACT_COLUMN: &str = "ABSTRACT";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    WEEKDAY_COLUMN,
    START_COLUMN,
    END_COLUMN,
    SESSION_COLUMN,
    NAME_COLUMN,
    TYPE_COLUMN,
    ROOM_COLUMN,
    TITLE_COLUMN,
    ABSTRACT_COLUMN,
];

/// One row of the schedule. Empty cells in optional columns load as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub id: TalkId,
    pub weekday: Option<Weekday>,
    pub start_time: Option<String>,
    pub end_time: String,
    pub session: String,
    pub presenter: Option<String>,
    pub talk_type: String,
    pub room: String,
    pub title: String,
    pub abstract_text: String,
}

/// The enriched schedule. Immutable once built; share it behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct Agenda {
    talks: Vec<Talk>,
    type_options: Vec<String>,
}

pub type SharedAgenda = Arc<Agenda>;

impl Agenda {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)
            .with_context(|| format!("failed to open agenda file '{}'", path.display()))?;
        let agenda = Self::from_reader(file)
            .with_context(|| format!("failed to parse agenda file '{}'", path.display()))?;
        info!(
            path = %path.display(),
            talks = agenda.len(),
            weekdays = agenda.weekdays().len(),
            "agenda loaded"
        );
        Ok(agenda)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);
        let headers = reader.headers().context("agenda header row is unreadable")?;
        let columns = ColumnIndex::resolve(headers)?;

        let mut talks = Vec::new();
        for (position, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("agenda row {} is malformed", position + 1))?;
            talks.push(columns.talk(TalkId(position), &record));
        }
        debug!(rows = talks.len(), "agenda rows parsed");
        Ok(Self::from_talks(talks))
    }

    /// Enriches type labels and renumbers ids by position.
    pub fn from_talks(mut talks: Vec<Talk>) -> Self {
        for (position, talk) in talks.iter_mut().enumerate() {
            talk.id = TalkId(position);
        }
        catalog::enrich(&mut talks);
        Self {
            talks,
            type_options: catalog::type_options(),
        }
    }

    pub fn into_shared(self) -> SharedAgenda {
        Arc::new(self)
    }

    pub fn talks(&self) -> &[Talk] {
        &self.talks
    }

    pub fn talk(&self, id: TalkId) -> Option<&Talk> {
        self.talks.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.talks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talks.is_empty()
    }

    pub fn type_options(&self) -> &[String] {
        &self.type_options
    }

    /// Weekdays that occur in the table, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.talks.iter().any(|talk| talk.weekday == Some(*day)))
            .collect()
    }
}

struct ColumnIndex {
    weekday: usize,
    start: usize,
    end: usize,
    session: usize,
    name: usize,
    talk_type: usize,
    room: usize,
    title: usize,
    abstract_text: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(headers, column).is_none())
            .collect();
        if !missing.is_empty() {
            bail!("missing required column(s): {}", missing.join(", "));
        }

        let find = |column: &str| position(headers, column).unwrap_or_default();
        Ok(Self {
            weekday: find(WEEKDAY_COLUMN),
            start: find(START_COLUMN),
            end: find(END_COLUMN),
            session: find(SESSION_COLUMN),
            name: find(NAME_COLUMN),
            talk_type: find(TYPE_COLUMN),
            room: find(ROOM_COLUMN),
            title: find(TITLE_COLUMN),
            abstract_text: find(ABSTRACT_COLUMN),
        })
    }

    /// Unrecognised weekday cells load as `None`; the row stays browsable by
    /// name and type but drops out of the weekday lists.
    fn talk(&self, id: TalkId, record: &StringRecord) -> Talk {
        let cell = |index: usize| record.get(index).unwrap_or_default();
        let weekday = optional(cell(self.weekday)).and_then(|raw| {
            let day = Weekday::from_name(raw);
            if day.is_none() {
                warn!(
                    row = id.0 + 1,
                    column = WEEKDAY_COLUMN,
                    value = raw,
                    "unrecognised weekday; row left out of weekday lists"
                );
            }
            day
        });

        Talk {
            id,
            weekday,
            start_time: optional(cell(self.start)).map(str::to_string),
            end_time: cell(self.end).to_string(),
            session: cell(self.session).to_string(),
            presenter: optional(cell(self.name)).map(str::to_string),
            talk_type: cell(self.talk_type).to_string(),
            room: cell(self.room).to_string(),
            title: cell(self.title).to_string(),
            abstract_text: cell(self.abstract_text).to_string(),
        }
    }
}

fn position(headers: &StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == column)
}

fn optional(cell: &str) -> Option<&str> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
