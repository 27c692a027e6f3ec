//! HTML front end: sidebar form, notices, overview table and detail blocks.

use std::{fmt::Write as _, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use server_api::agenda_view;
use shared::{
    domain::ViewMode,
    error::ApiError,
    protocol::{
        AgendaView, Notice, OverviewTable, SidebarControls, TalkDetail, ViewQuery,
        BACK_TO_TOP_LABEL, OVERVIEW_ANCHOR,
    },
};
use tracing::warn;

use crate::{
    api::status_for,
    app_state::{AppState, PageSettings},
};

const FORM_ID: &str = "controls";
const SUBMIT_ON_CHANGE: &str = r#"onchange="this.form.submit()""#;

pub(crate) async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> (StatusCode, Html<String>) {
    let mode = query.mode;
    match agenda_view(&state.api, query) {
        Ok(view) => (StatusCode::OK, Html(render_page(&state.page, &view))),
        Err(error) => {
            warn!(?mode, message = %error.message, "rejected agenda query");
            (
                status_for(error.code),
                Html(render_error_page(&state.page, mode, &error)),
            )
        }
    }
}

pub(crate) fn render_page(page: &PageSettings, view: &AgendaView) -> String {
    let mut main = String::new();
    let _ = writeln!(main, "<h1>{}</h1>", escape(&page.heading));
    let _ = writeln!(
        main,
        r#"<label class="toggle"><input type="checkbox" name="show_table" value="true" form="{FORM_ID}" {} {SUBMIT_ON_CHANGE}> Show Schedule Overview Table</label>"#,
        checked(view.show_table)
    );
    if let Some(notice) = view.status.notice() {
        main.push_str(&notice_html(notice));
    }
    if view.status.has_results() {
        if let Some(overview) = &view.overview {
            main.push_str("<h2>Schedule Overview</h2>\n");
            let _ = writeln!(main, "<div id='{OVERVIEW_ANCHOR}'></div>");
            main.push_str(&overview_html(overview));
            main.push_str("<hr>\n");
        }
        main.push_str("<h2>Detailed Information</h2>\n");
        for detail in &view.details {
            main.push_str(&detail_html(detail));
        }
    }

    layout(page, &sidebar_html(view.mode, &view.sidebar), &main)
}

pub(crate) fn render_error_page(page: &PageSettings, mode: ViewMode, error: &ApiError) -> String {
    let mut main = String::new();
    let _ = writeln!(main, "<h1>{}</h1>", escape(&page.heading));
    let _ = writeln!(
        main,
        r#"<div class="notice error">{}</div>"#,
        escape(&error.message)
    );
    let _ = writeln!(
        main,
        r#"<p><a href="/?mode={}">Reset the filters</a></p>"#,
        mode.key()
    );
    let sidebar = format!(
        r#"<form id="{FORM_ID}" method="get" action="/">{}</form>"#,
        mode_radios(mode)
    );
    layout(page, &sidebar, &main)
}

fn layout(page: &PageSettings, sidebar: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="icon" href="/favicon.ico">
<style>{css}</style>
</head>
<body>
<aside class="sidebar">
{sidebar}
</aside>
<main>
{main}
</main>
</body>
</html>
"#,
        title = escape(&page.title),
        css = STYLE,
    )
}

fn sidebar_html(mode: ViewMode, controls: &SidebarControls) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<form id="{FORM_ID}" method="get" action="/">"#);
    let _ = writeln!(
        out,
        r#"<input type="hidden" name="form" value="{}">"#,
        mode.key()
    );
    out.push_str(&mode_radios(mode));

    match controls {
        SidebarControls::WeekdayTime {
            weekdays,
            selected_weekday,
            show_all_times,
            start_times,
            selected_start_time,
        } => {
            let days: Vec<String> = weekdays.iter().map(|day| day.to_string()).collect();
            let selected_day = selected_weekday.map(|day| day.to_string());
            out.push_str(&select("weekday", "Select Weekday", &days, selected_day.as_deref()));
            let _ = writeln!(
                out,
                r#"<label class="toggle"><input type="checkbox" name="all_times" value="true" {} {SUBMIT_ON_CHANGE}> Show all times for this weekday</label>"#,
                checked(*show_all_times)
            );
            if !show_all_times {
                out.push_str(&select(
                    "start_time",
                    "Select Start Time",
                    start_times,
                    selected_start_time.as_deref(),
                ));
            }
        }
        SidebarControls::WeekdaySession {
            labels,
            selected_label,
        } => {
            out.push_str(&select(
                "session",
                "Select Session",
                labels,
                selected_label.as_deref(),
            ));
        }
        SidebarControls::Name { query } => {
            let _ = writeln!(
                out,
                r#"<label>Enter part of a name<input type="text" name="name" value="{}" autofocus></label>"#,
                escape(query)
            );
        }
        SidebarControls::Type { options, selected } => {
            out.push_str(&select("talk_type", "Select Type", options, selected.as_deref()));
        }
    }

    out.push_str("<button type=\"submit\">Apply</button>\n</form>");
    out
}

fn mode_radios(active: ViewMode) -> String {
    let mut out = String::from("<fieldset><legend>Select Page</legend>\n");
    for mode in ViewMode::ALL {
        let _ = writeln!(
            out,
            r#"<label><input type="radio" name="mode" value="{}" {} {SUBMIT_ON_CHANGE}> {}</label>"#,
            mode.key(),
            checked(mode == active),
            escape(mode.label())
        );
    }
    out.push_str("</fieldset>\n");
    out
}

fn select(name: &str, label: &str, options: &[String], selected: Option<&str>) -> String {
    let mut out = format!(r#"<label>{label}<select name="{name}" {SUBMIT_ON_CHANGE}>"#);
    for option in options {
        let is_selected = selected == Some(option.as_str());
        let _ = write!(
            out,
            r#"<option value="{value}"{attr}>{value}</option>"#,
            value = escape(option),
            attr = if is_selected { " selected" } else { "" }
        );
    }
    out.push_str("</select></label>\n");
    out
}

fn checked(on: bool) -> &'static str {
    if on {
        "checked"
    } else {
        ""
    }
}

fn notice_html(notice: Notice) -> String {
    let class = match notice {
        Notice::Info(_) => "info",
        Notice::Warning(_) => "warning",
    };
    format!(
        "<div class=\"notice {class}\">{}</div>\n",
        escape(notice.message())
    )
}

fn overview_html(table: &OverviewTable) -> String {
    let mut out = String::from("<table class=\"overview\">\n<thead><tr>");
    for header in table.headers() {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in &row.cells {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        let _ = write!(
            out,
            r#"<td><a href="{}">{}</a></td>"#,
            escape(&row.link.target),
            escape(&row.link.text)
        );
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn detail_html(detail: &TalkDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div id='{}' class='anchor'></div>",
        escape(&detail.anchor)
    );
    let _ = writeln!(out, "<h3>{}</h3>", escape(&detail.title));
    let _ = writeln!(
        out,
        "<p><strong>Session:</strong> {}, <strong>Type:</strong> {}, <strong>Time:</strong> {}, <strong>Room:</strong> {}</p>",
        escape(&detail.session),
        escape(&detail.talk_type),
        escape(&detail.time_range()),
        escape(&detail.room)
    );
    let _ = writeln!(
        out,
        "<p><strong>Presenter:</strong> {}</p>",
        escape(&detail.presenter)
    );
    out.push_str("<p><strong>Abstract:</strong></p>\n");
    let _ = writeln!(
        out,
        "<div class=\"abstract\">{}</div>",
        markdown_html(&detail.abstract_text)
    );
    let _ = writeln!(
        out,
        "<p><a href=\"#{OVERVIEW_ANCHOR}\">{BACK_TO_TOP_LABEL}</a></p>\n<hr>"
    );
    out
}

/// Abstracts are markdown. Raw HTML inside them is shown as text, never injected,
/// and links or images with any other target than [`SAFE_LINK_PREFIXES`] keep
/// only their text.
pub(crate) fn markdown_html(source: &str) -> String {
    // One entry per open link or image: whether its tags are emitted.
    let mut open_targets: Vec<bool> = Vec::new();
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .filter_map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
            Event::Start(Tag::Link { ref dest_url, .. })
            | Event::Start(Tag::Image { ref dest_url, .. }) => {
                let keep = safe_target(dest_url);
                open_targets.push(keep);
                keep.then_some(event)
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                open_targets.pop().unwrap_or(true).then_some(event)
            }
            other => Some(other),
        });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

const SAFE_LINK_PREFIXES: [&str; 4] = ["http://", "https://", "mailto:", "#"];

fn safe_target(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    SAFE_LINK_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = r#"
body { display: flex; margin: 0; font-family: system-ui, sans-serif; color: #262730; }
.sidebar { width: 18rem; min-height: 100vh; padding: 1.5rem 1rem; background: #f0f2f6; box-sizing: border-box; }
.sidebar label { display: block; margin: 0.6rem 0; }
.sidebar select, .sidebar input[type=text] { display: block; width: 100%; margin-top: 0.3rem; }
.sidebar fieldset { border: none; padding: 0; margin: 0 0 1rem 0; }
main { flex: 1; padding: 1.5rem 3rem; overflow-y: auto; height: 100vh; box-sizing: border-box; }
table.overview { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
table.overview th, table.overview td { border: 1px solid #d6d6d9; padding: 0.3rem 0.5rem; text-align: left; }
.notice { padding: 0.8rem 1rem; border-radius: 0.4rem; margin: 1rem 0; }
.notice.info { background: #e8f0fe; }
.notice.warning { background: #fff4d6; }
.notice.error { background: #fde8e8; }
.toggle { display: block; margin: 0.6rem 0; }
"#;

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
