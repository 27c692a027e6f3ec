use super::*;
use crate::render;
use shared::protocol::{Selection, NAME_PROMPT_MESSAGE, NO_RESULTS_MESSAGE};
use storage::Agenda;

const AGENDA_CSV: &str = "\
WEEKDAY,START_STR,END_STR,SESSION,FULL_NAME,TYPE,ROOM,TITLE,ABSTRACT
Monday,09:00,09:25,A1,Ada Lovelace,Plenary,Hall,Engines | analytical,Notes on *Bernoulli* numbers
Monday,09:30,09:55,A1,Jane Smith,CT,Hall,Bounds,
";

fn agenda() -> Agenda {
    Agenda::from_reader(AGENDA_CSV.as_bytes()).expect("agenda")
}

#[test]
fn renders_overview_table_with_anchor_links() {
    let view = render(
        &agenda(),
        &Selection::Type {
            talk_type: Some("Plenary".into()),
        },
        true,
    )
    .expect("render");
    let markdown = to_markdown(&view);

    assert!(markdown.contains("## Schedule Overview"));
    assert!(markdown.contains("<div id='schedule-overview'></div>"));
    assert!(markdown.contains(
        "| Day | Start Time | End Time | Session | Presenter | Type | Room | Details |"
    ));
    assert!(markdown.contains(
        "| Monday | 09:00 | 09:25 | A1 | Ada Lovelace | Plenary | Hall | [Engines \\| analytical](#0) |"
    ));
}

#[test]
fn renders_detail_blocks_with_back_links() {
    let view = render(
        &agenda(),
        &Selection::Name {
            query: "ada".into(),
        },
        false,
    )
    .expect("render");
    let markdown = to_markdown(&view);

    assert!(!markdown.contains("## Schedule Overview"));
    assert!(markdown.contains("## Detailed Information"));
    assert!(markdown.contains("<div id='0' class='anchor'></div>"));
    assert!(markdown.contains("### Engines | analytical"));
    assert!(markdown.contains(
        "**Session:** A1, **Type:** Plenary, **Time:** 09:00–09:25, **Room:** Hall"
    ));
    assert!(markdown.contains("**Presenter:** Ada Lovelace"));
    assert!(markdown.contains("Notes on *Bernoulli* numbers"));
    assert!(markdown.contains("[🔝](#schedule-overview)"));
}

#[test]
fn grouped_view_table_omits_day_and_session() {
    let view = render(
        &agenda(),
        &Selection::WeekdaySession {
            label: Some("Monday A1".into()),
        },
        true,
    )
    .expect("render");
    let markdown = to_markdown(&view);
    assert!(markdown.contains("| Start Time | End Time | Presenter | Type | Room | Details |"));
    assert_eq!(markdown.matches("class='anchor'").count(), 2);
}

#[test]
fn notices_replace_the_sections() {
    let empty = render(&agenda(), &Selection::Name { query: String::new() }, true)
        .expect("render");
    let markdown = to_markdown(&empty);
    assert!(markdown.contains(NAME_PROMPT_MESSAGE));
    assert!(!markdown.contains(NO_RESULTS_MESSAGE));
    assert!(!markdown.contains("## Detailed Information"));

    let unmatched = render(
        &agenda(),
        &Selection::Name {
            query: "zzz".into(),
        },
        true,
    )
    .expect("render");
    assert!(to_markdown(&unmatched).contains(NO_RESULTS_MESSAGE));
}

#[test]
fn link_text_escapes_brackets_from_titles() {
    let csv = "\
WEEKDAY,START_STR,END_STR,SESSION,FULL_NAME,TYPE,ROOM,TITLE,ABSTRACT
Monday,09:00,09:25,CT-1,Jane Smith,CT,Hall,\"On [0,1) intervals\",
";
    let agenda = Agenda::from_reader(csv.as_bytes()).expect("agenda");
    let view = render(
        &agenda,
        &Selection::Name {
            query: "smith".into(),
        },
        true,
    )
    .expect("render");
    let markdown = to_markdown(&view);

    assert!(
        markdown.contains(r"[On \[0,1) intervals](#0)"),
        "{markdown}"
    );
    assert!(markdown.contains("### On [0,1) intervals"));
}
