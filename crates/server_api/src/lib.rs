use shared::{
    domain::{TalkId, ViewMode},
    error::{ApiError, ErrorCode},
    protocol::{AgendaOptions, AgendaView, DayStartTimes, TalkDetail, ViewQuery},
};
use storage::{Agenda, SharedAgenda};

pub mod filter;
pub mod markdown;
mod render;

pub use render::{link_text, overview_columns, render};

/// Read-only state every request works from.
#[derive(Clone)]
pub struct ApiContext {
    pub agenda: SharedAgenda,
}

impl ApiContext {
    pub fn new(agenda: Agenda) -> Self {
        Self {
            agenda: agenda.into_shared(),
        }
    }
}

pub fn agenda_view(ctx: &ApiContext, query: ViewQuery) -> Result<AgendaView, ApiError> {
    let show_table = query.show_table();
    let selection = query.into_selection()?;
    render(&ctx.agenda, &selection, show_table)
}

pub fn agenda_options(ctx: &ApiContext) -> AgendaOptions {
    let agenda = &ctx.agenda;
    AgendaOptions {
        modes: ViewMode::ALL.to_vec(),
        weekdays: agenda
            .weekdays()
            .into_iter()
            .map(|weekday| DayStartTimes {
                weekday,
                start_times: filter::start_times(agenda, weekday),
            })
            .collect(),
        session_labels: filter::session_labels(agenda)
            .into_iter()
            .map(|label| label.label)
            .collect(),
        talk_types: agenda.type_options().to_vec(),
    }
}

pub fn talk_detail(ctx: &ApiContext, id: TalkId) -> Result<TalkDetail, ApiError> {
    ctx.agenda
        .talk(id)
        .map(render::detail)
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, format!("talk {} not found", id.0)))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
