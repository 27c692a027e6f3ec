use super::*;

#[test]
fn cli_parses_global_flags_before_subcommand() {
    let cli = Cli::try_parse_from(["tools", "--no-table", "name", "smith"]).expect("cli");
    assert!(cli.no_table);
    assert_eq!(cli.data, PathBuf::from("./data/agenda.csv"));
    match cli.command {
        Command::Name { query } => assert_eq!(query, "smith"),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn weekday_time_shows_all_times_unless_one_is_given() {
    let all = view_query(
        &Command::WeekdayTime {
            weekday: Some("Monday".into()),
            start_time: None,
        },
        true,
    )
    .expect("query");
    assert_eq!(all.all_times, Some(true));
    assert!(all.show_table());

    let narrowed = view_query(
        &Command::WeekdayTime {
            weekday: None,
            start_time: Some("10:00".into()),
        },
        false,
    )
    .expect("query");
    assert_eq!(narrowed.all_times, Some(false));
    assert_eq!(narrowed.start_time.as_deref(), Some("10:00"));
    assert!(!narrowed.show_table());
}

#[test]
fn options_command_renders_no_view() {
    assert!(view_query(&Command::Options, true).is_none());
}

#[test]
fn type_query_renders_markdown_for_sample_agenda() {
    let csv = "\
WEEKDAY,START_STR,END_STR,SESSION,FULL_NAME,TYPE,ROOM,TITLE,ABSTRACT
Monday,10:00,10:25,CT-1,Jane Smith,CT,Room 205,Bounds on the numerical radius,Short.
";
    let ctx = ApiContext::new(Agenda::from_reader(csv.as_bytes()).expect("agenda"));
    let command = Command::Type {
        talk_type: Some("Contributed talks".into()),
    };
    let query = view_query(&command, true).expect("query");
    let view = agenda_view(&ctx, query).expect("view");
    let markdown = to_markdown(&view);
    assert!(markdown.contains("### Bounds on the numerical radius"));
}
