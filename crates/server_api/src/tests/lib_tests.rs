use super::*;
use shared::{
    domain::Weekday,
    protocol::{SidebarControls, ViewStatus},
};

fn setup() -> ApiContext {
    let csv = "\
WEEKDAY,START_STR,END_STR,SESSION,FULL_NAME,TYPE,ROOM,TITLE,ABSTRACT
Tuesday,10:00,10:25,MS6-1,Serkan Gugercin,MS6,Room 103,Data-driven model reduction,Loewner
Monday,09:30,09:55,MS6-1,Jane Smith,MS6,Room 103,Balanced truncation,
Monday,08:30,09:20,Plenary I,Fan Chung,Plenary,Auditorium,Spectral graph theory,
";
    ApiContext::new(Agenda::from_reader(csv.as_bytes()).expect("agenda"))
}

#[test]
fn default_query_shows_first_weekday_with_table() {
    let ctx = setup();
    let view = agenda_view(&ctx, ViewQuery::default()).expect("view");
    assert_eq!(view.mode, ViewMode::WeekdayTime);
    assert_eq!(view.status, ViewStatus::Results { count: 2 });
    assert!(view.overview.is_some());
    match view.sidebar {
        SidebarControls::WeekdayTime {
            selected_weekday, ..
        } => assert_eq!(selected_weekday, Some(Weekday::Monday)),
        other => panic!("unexpected sidebar {other:?}"),
    }
}

#[test]
fn submitted_form_without_table_checkbox_hides_overview() {
    let ctx = setup();
    let query = ViewQuery {
        mode: ViewMode::Name,
        name: Some("smith".into()),
        form: Some(ViewMode::Name),
        ..ViewQuery::default()
    };
    let view = agenda_view(&ctx, query).expect("view");
    assert!(view.overview.is_none());
    assert_eq!(view.details.len(), 1);
}

#[test]
fn invalid_weekday_is_reported_as_validation_error() {
    let ctx = setup();
    let query = ViewQuery {
        weekday: Some("Someday".into()),
        ..ViewQuery::default()
    };
    let err = agenda_view(&ctx, query).expect_err("should fail");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn options_cover_every_control() {
    let options = agenda_options(&setup());
    assert_eq!(options.modes, ViewMode::ALL.to_vec());
    assert_eq!(
        options.weekdays,
        vec![
            DayStartTimes {
                weekday: Weekday::Monday,
                start_times: vec!["08:30".into(), "09:30".into()],
            },
            DayStartTimes {
                weekday: Weekday::Tuesday,
                start_times: vec!["10:00".into()],
            },
        ]
    );
    assert_eq!(
        options.session_labels,
        vec!["Tuesday MS6-1", "Monday MS6-1", "Monday Plenary I"]
    );
    assert_eq!(options.talk_types.len(), 37);
}

#[test]
fn talk_detail_looks_up_by_anchor_id() {
    let ctx = setup();
    let detail = talk_detail(&ctx, TalkId(0)).expect("detail");
    assert_eq!(detail.title, "Data-driven model reduction");
    assert_eq!(detail.talk_type, "MS6 : Model reduction");

    let err = talk_detail(&ctx, TalkId(3)).expect_err("should fail");
    assert_eq!(err.code, ErrorCode::NotFound);
}
