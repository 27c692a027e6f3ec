use serde::{Deserialize, Serialize};

use crate::{
    domain::{TalkId, ViewMode, Weekday},
    error::ApiError,
};

/// Fragment id of the overview container; every detail block links back to it.
pub const OVERVIEW_ANCHOR: &str = "schedule-overview";
pub const BACK_TO_TOP_LABEL: &str = "🔝";
pub const LINK_COLUMN_HEADER: &str = "Details";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const NAME_PROMPT_MESSAGE: &str = "Please enter a name to search.";

/// Flat request shape shared by the HTML form, the JSON endpoint and the CLI.
///
/// Every control of every mode travels in one struct; [`ViewQuery::into_selection`]
/// keeps only the controls of the active mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_times: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_table: Option<bool>,
    /// Mode the HTML form was rendered for. An unchecked checkbox is absent
    /// from a submitted form, so absence reads as "unchecked" only for
    /// checkboxes that form actually showed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<ViewMode>,
}

impl ViewQuery {
    pub fn show_table(&self) -> bool {
        self.show_table.unwrap_or(self.form.is_none())
    }

    pub fn into_selection(self) -> Result<Selection, ApiError> {
        let submitted = self.form == Some(self.mode);
        let selection = match self.mode {
            ViewMode::WeekdayTime => {
                let weekday = non_empty(self.weekday)
                    .map(|raw| {
                        raw.parse::<Weekday>()
                            .map_err(|err| ApiError::validation(err.to_string()))
                    })
                    .transpose()?;
                Selection::WeekdayTime {
                    weekday,
                    show_all_times: self.all_times.unwrap_or(!submitted),
                    start_time: non_empty(self.start_time),
                }
            }
            ViewMode::WeekdaySession => Selection::WeekdaySession {
                label: non_empty(self.session),
            },
            ViewMode::Name => Selection::Name {
                query: self.name.unwrap_or_default(),
            },
            ViewMode::Type => Selection::Type {
                talk_type: non_empty(self.talk_type),
            },
        };
        Ok(selection)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The active view mode together with its own controls. `None` means "first option".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    WeekdayTime {
        weekday: Option<Weekday>,
        show_all_times: bool,
        start_time: Option<String>,
    },
    WeekdaySession {
        label: Option<String>,
    },
    Name {
        query: String,
    },
    Type {
        talk_type: Option<String>,
    },
}

impl Selection {
    pub fn mode(&self) -> ViewMode {
        match self {
            Selection::WeekdayTime { .. } => ViewMode::WeekdayTime,
            Selection::WeekdaySession { .. } => ViewMode::WeekdaySession,
            Selection::Name { .. } => ViewMode::Name,
            Selection::Type { .. } => ViewMode::Type,
        }
    }
}

/// Sidebar state after resolution: option lists plus the value actually used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SidebarControls {
    WeekdayTime {
        weekdays: Vec<Weekday>,
        selected_weekday: Option<Weekday>,
        show_all_times: bool,
        /// Only populated when a single start time is being picked.
        start_times: Vec<String>,
        selected_start_time: Option<String>,
    },
    WeekdaySession {
        labels: Vec<String>,
        selected_label: Option<String>,
    },
    Name {
        query: String,
    },
    Type {
        options: Vec<String>,
        selected: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewStatus {
    Results { count: usize },
    NoResults,
    NameRequired,
}

impl ViewStatus {
    pub fn has_results(self) -> bool {
        matches!(self, ViewStatus::Results { .. })
    }

    pub fn notice(self) -> Option<Notice> {
        match self {
            ViewStatus::Results { .. } => None,
            ViewStatus::NoResults => Some(Notice::Warning(NO_RESULTS_MESSAGE)),
            ViewStatus::NameRequired => Some(Notice::Info(NAME_PROMPT_MESSAGE)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info(&'static str),
    Warning(&'static str),
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Info(message) | Notice::Warning(message) => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryColumn {
    Day,
    StartTime,
    EndTime,
    Session,
    Presenter,
    Type,
    Room,
}

impl SummaryColumn {
    pub const ALL: [SummaryColumn; 7] = [
        SummaryColumn::Day,
        SummaryColumn::StartTime,
        SummaryColumn::EndTime,
        SummaryColumn::Session,
        SummaryColumn::Presenter,
        SummaryColumn::Type,
        SummaryColumn::Room,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SummaryColumn::Day => "Day",
            SummaryColumn::StartTime => "Start Time",
            SummaryColumn::EndTime => "End Time",
            SummaryColumn::Session => "Session",
            SummaryColumn::Presenter => "Presenter",
            SummaryColumn::Type => "Type",
            SummaryColumn::Room => "Room",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorLink {
    pub text: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub id: TalkId,
    /// One cell per entry of [`OverviewTable::columns`].
    pub cells: Vec<String>,
    pub link: AnchorLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewTable {
    pub columns: Vec<SummaryColumn>,
    pub rows: Vec<OverviewRow>,
}

impl OverviewTable {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|column| column.header())
            .chain(std::iter::once(LINK_COLUMN_HEADER))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkDetail {
    pub id: TalkId,
    pub anchor: String,
    pub title: String,
    pub session: String,
    pub talk_type: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub presenter: String,
    pub abstract_text: String,
}

impl TalkDetail {
    pub fn time_range(&self) -> String {
        format!("{}–{}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStartTimes {
    pub weekday: Weekday,
    pub start_times: Vec<String>,
}

/// Every option list the sidebar can offer, independent of any selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaOptions {
    pub modes: Vec<ViewMode>,
    pub weekdays: Vec<DayStartTimes>,
    pub session_labels: Vec<String>,
    pub talk_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaView {
    pub mode: ViewMode,
    pub sidebar: SidebarControls,
    pub status: ViewStatus,
    pub show_table: bool,
    pub overview: Option<OverviewTable>,
    pub details: Vec<TalkDetail>,
}
