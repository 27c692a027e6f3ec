use shared::{
    domain::ViewMode,
    error::ApiError,
    protocol::{
        AgendaView, AnchorLink, OverviewRow, OverviewTable, Selection, SummaryColumn, TalkDetail,
        ViewStatus,
    },
};
use storage::{Agenda, Talk};
use tracing::debug;

use crate::filter;

/// Builds the whole view for one request: filter, then overview and detail passes.
///
/// Both passes take their anchors from the talk's table position, so an
/// overview link and its detail block always agree.
pub fn render(
    agenda: &Agenda,
    selection: &Selection,
    show_table: bool,
) -> Result<AgendaView, ApiError> {
    let mode = selection.mode();
    let outcome = filter::apply(agenda, selection)?;

    let status = if outcome.awaiting_input {
        ViewStatus::NameRequired
    } else if outcome.talks.is_empty() {
        ViewStatus::NoResults
    } else {
        ViewStatus::Results {
            count: outcome.talks.len(),
        }
    };
    debug!(?mode, ?status, show_table, "view rendered");

    let (overview, details) = if status.has_results() {
        let overview = show_table.then(|| overview_table(mode, &outcome.talks));
        let details = outcome.talks.iter().map(|talk| detail(talk)).collect();
        (overview, details)
    } else {
        (None, Vec::new())
    };

    Ok(AgendaView {
        mode,
        sidebar: outcome.sidebar,
        status,
        show_table,
        overview,
        details,
    })
}

pub fn overview_columns(mode: ViewMode) -> Vec<SummaryColumn> {
    SummaryColumn::ALL
        .into_iter()
        .filter(|column| {
            !(mode.groups_by_day() && matches!(column, SummaryColumn::Day | SummaryColumn::Session))
        })
        .collect()
}

/// Titles may carry line breaks from the spreadsheet; links must stay on one line.
pub fn link_text(title: &str) -> String {
    title.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

fn overview_table(mode: ViewMode, talks: &[&Talk]) -> OverviewTable {
    let columns = overview_columns(mode);
    let rows = talks
        .iter()
        .map(|talk| OverviewRow {
            id: talk.id,
            cells: columns.iter().map(|column| cell(talk, *column)).collect(),
            link: AnchorLink {
                text: link_text(&talk.title),
                target: talk.id.href(),
            },
        })
        .collect();
    OverviewTable { columns, rows }
}

fn cell(talk: &Talk, column: SummaryColumn) -> String {
    match column {
        SummaryColumn::Day => talk
            .weekday
            .map(|day| day.to_string())
            .unwrap_or_default(),
        SummaryColumn::StartTime => talk.start_time.clone().unwrap_or_default(),
        SummaryColumn::EndTime => talk.end_time.clone(),
        SummaryColumn::Session => talk.session.clone(),
        SummaryColumn::Presenter => talk.presenter.clone().unwrap_or_default(),
        SummaryColumn::Type => talk.talk_type.clone(),
        SummaryColumn::Room => talk.room.clone(),
    }
}

pub(crate) fn detail(talk: &Talk) -> TalkDetail {
    TalkDetail {
        id: talk.id,
        anchor: talk.id.anchor(),
        title: talk.title.clone(),
        session: talk.session.clone(),
        talk_type: talk.talk_type.clone(),
        start_time: talk.start_time.clone().unwrap_or_default(),
        end_time: talk.end_time.clone(),
        room: talk.room.clone(),
        presenter: talk.presenter.clone().unwrap_or_default(),
        abstract_text: talk.abstract_text.clone(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
