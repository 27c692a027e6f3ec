//! Per-mode selection over the loaded agenda.
//!
//! Every function here borrows the agenda and returns references into it, so a
//! request never copies or mutates the shared table.

use std::cmp::Ordering;

use shared::{
    domain::Weekday,
    error::ApiError,
    protocol::{Selection, SidebarControls},
};
use storage::{Agenda, Talk};
use tracing::debug;

/// Rows picked by one selection, plus the sidebar state that produced them.
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    pub sidebar: SidebarControls,
    pub talks: Vec<&'a Talk>,
    /// The name search has no query yet; not the same thing as "no match".
    pub awaiting_input: bool,
}

impl<'a> FilterOutcome<'a> {
    fn new(sidebar: SidebarControls, talks: Vec<&'a Talk>) -> Self {
        Self {
            sidebar,
            talks,
            awaiting_input: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLabel {
    pub label: String,
    pub session: String,
}

pub fn apply<'a>(agenda: &'a Agenda, selection: &Selection) -> Result<FilterOutcome<'a>, ApiError> {
    match selection {
        Selection::WeekdayTime {
            weekday,
            show_all_times,
            start_time,
        } => by_weekday_time(agenda, *weekday, *show_all_times, start_time.as_deref()),
        Selection::WeekdaySession { label } => by_weekday_session(agenda, label.as_deref()),
        Selection::Name { query } => Ok(by_name(agenda, query)),
        Selection::Type { talk_type } => by_type(agenda, talk_type.as_deref()),
    }
}

/// Distinct start times of one weekday, ascending as strings.
pub fn start_times(agenda: &Agenda, weekday: Weekday) -> Vec<String> {
    let mut times: Vec<String> = agenda
        .talks()
        .iter()
        .filter(|talk| talk.weekday == Some(weekday))
        .filter_map(|talk| talk.start_time.clone())
        .collect();
    times.sort();
    times.dedup();
    times
}

/// `"<weekday> <session>"` labels in first-occurrence order.
///
/// Rows without a weekday have no label.
pub fn session_labels(agenda: &Agenda) -> Vec<SessionLabel> {
    let mut labels: Vec<SessionLabel> = Vec::new();
    for talk in agenda.talks() {
        let Some(weekday) = talk.weekday else {
            continue;
        };
        let label = format!("{weekday} {}", talk.session);
        if labels.iter().any(|existing| existing.label == label) {
            continue;
        }
        labels.push(SessionLabel {
            label,
            session: talk.session.clone(),
        });
    }
    labels
}

/// Case-insensitive presenter substring search, ordered by start time.
///
/// The sort is stable, so talks sharing a start time keep their table order.
/// Talks without a start time go last.
pub fn search_presenters<'a>(agenda: &'a Agenda, query: &str) -> Vec<&'a Talk> {
    let needle = query.to_lowercase();
    let mut talks: Vec<&Talk> = agenda
        .talks()
        .iter()
        .filter(|talk| {
            talk.presenter
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect();
    talks.sort_by(|a, b| compare_start(a, b));
    talks
}

fn compare_start(a: &Talk, b: &Talk) -> Ordering {
    match (&a.start_time, &b.start_time) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_weekday_time<'a>(
    agenda: &'a Agenda,
    weekday: Option<Weekday>,
    show_all_times: bool,
    start_time: Option<&str>,
) -> Result<FilterOutcome<'a>, ApiError> {
    let weekdays = agenda.weekdays();
    let selected_weekday = match weekday {
        Some(day) if weekdays.contains(&day) => Some(day),
        Some(day) => {
            return Err(ApiError::validation(format!("no talks scheduled on {day}")));
        }
        None => weekdays.first().copied(),
    };

    let day_talks: Vec<&Talk> = agenda
        .talks()
        .iter()
        .filter(|talk| selected_weekday.is_some() && talk.weekday == selected_weekday)
        .collect();

    if show_all_times {
        let sidebar = SidebarControls::WeekdayTime {
            weekdays,
            selected_weekday,
            show_all_times,
            start_times: Vec::new(),
            selected_start_time: None,
        };
        return Ok(FilterOutcome::new(sidebar, day_talks));
    }

    let times = selected_weekday
        .map(|day| start_times(agenda, day))
        .unwrap_or_default();
    let selected_start_time = match start_time {
        Some(time) if times.iter().any(|t| t == time) => Some(time.to_string()),
        Some(time) => {
            debug!(%time, "start time not offered for weekday; using first");
            times.first().cloned()
        }
        None => times.first().cloned(),
    };
    let talks = match selected_start_time.as_deref() {
        Some(time) => day_talks
            .into_iter()
            .filter(|talk| talk.start_time.as_deref() == Some(time))
            .collect(),
        None => Vec::new(),
    };

    let sidebar = SidebarControls::WeekdayTime {
        weekdays,
        selected_weekday,
        show_all_times,
        start_times: times,
        selected_start_time,
    };
    Ok(FilterOutcome::new(sidebar, talks))
}

fn by_weekday_session<'a>(
    agenda: &'a Agenda,
    label: Option<&str>,
) -> Result<FilterOutcome<'a>, ApiError> {
    let labels = session_labels(agenda);
    let selected = match label {
        Some(label) => Some(
            labels
                .iter()
                .find(|candidate| candidate.label == label)
                .ok_or_else(|| ApiError::validation(format!("unknown session '{label}'")))?,
        ),
        None => labels.first(),
    };

    // Matches on the session alone, so the same session name on another day is included.
    let talks = match selected {
        Some(selected) => agenda
            .talks()
            .iter()
            .filter(|talk| talk.session == selected.session)
            .collect(),
        None => Vec::new(),
    };

    let sidebar = SidebarControls::WeekdaySession {
        selected_label: selected.map(|s| s.label.clone()),
        labels: labels.into_iter().map(|s| s.label).collect(),
    };
    Ok(FilterOutcome::new(sidebar, talks))
}

fn by_name<'a>(agenda: &'a Agenda, query: &str) -> FilterOutcome<'a> {
    let query = query.trim();
    let sidebar = SidebarControls::Name {
        query: query.to_string(),
    };
    if query.is_empty() {
        return FilterOutcome {
            sidebar,
            talks: Vec::new(),
            awaiting_input: true,
        };
    }
    FilterOutcome::new(sidebar, search_presenters(agenda, query))
}

fn by_type<'a>(agenda: &'a Agenda, talk_type: Option<&str>) -> Result<FilterOutcome<'a>, ApiError> {
    let options = agenda.type_options();
    let selected = match talk_type {
        Some(value) => Some(
            options
                .iter()
                .find(|option| option.as_str() == value)
                .ok_or_else(|| ApiError::validation(format!("unknown talk type '{value}'")))?,
        ),
        None => options.first(),
    };

    let talks = match selected {
        Some(selected) => agenda
            .talks()
            .iter()
            .filter(|talk| &talk.talk_type == selected)
            .collect(),
        None => Vec::new(),
    };

    let sidebar = SidebarControls::Type {
        options: options.to_vec(),
        selected: selected.cloned(),
    };
    Ok(FilterOutcome::new(sidebar, talks))
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
