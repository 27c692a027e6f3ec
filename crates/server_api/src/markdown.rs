//! Markdown rendering of an [`AgendaView`], used by the terminal tools.

use std::fmt::Write as _;

use shared::protocol::{
    AgendaView, OverviewTable, TalkDetail, BACK_TO_TOP_LABEL, OVERVIEW_ANCHOR,
};

pub fn to_markdown(view: &AgendaView) -> String {
    let mut out = String::new();

    if let Some(notice) = view.status.notice() {
        let _ = writeln!(out, "> {}\n", notice.message());
    }
    if !view.status.has_results() {
        return out;
    }

    if let Some(overview) = &view.overview {
        out.push_str("## Schedule Overview\n\n");
        let _ = writeln!(out, "<div id='{OVERVIEW_ANCHOR}'></div>\n");
        write_table(&mut out, overview);
        out.push_str("\n---\n\n");
    }

    out.push_str("## Detailed Information\n\n");
    for detail in &view.details {
        write_detail(&mut out, detail);
    }
    out
}

fn write_table(out: &mut String, table: &OverviewTable) {
    let headers = table.headers();
    let _ = writeln!(out, "| {} |", headers.join(" | "));
    let _ = writeln!(
        out,
        "|{}",
        headers.iter().map(|_| ":---|").collect::<String>()
    );
    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| table_cell(cell))
            .chain(std::iter::once(format!(
                "[{}]({})",
                link_label(&row.link.text),
                row.link.target
            )))
            .collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
}

fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Titles like "On [0,1) intervals" must not open a nested link.
fn link_label(value: &str) -> String {
    table_cell(value).replace('[', "\\[").replace(']', "\\]")
}

fn write_detail(out: &mut String, detail: &TalkDetail) {
    let _ = writeln!(out, "<div id='{}' class='anchor'></div>\n", detail.anchor);
    let _ = writeln!(out, "### {}\n", detail.title);
    let _ = writeln!(
        out,
        "**Session:** {}, **Type:** {}, **Time:** {}, **Room:** {}\n",
        detail.session,
        detail.talk_type,
        detail.time_range(),
        detail.room
    );
    let _ = writeln!(out, "**Presenter:** {}\n", detail.presenter);
    out.push_str("**Abstract:**\n\n");
    if !detail.abstract_text.trim().is_empty() {
        let _ = writeln!(out, "{}\n", detail.abstract_text.trim_end());
    }
    let _ = writeln!(out, "[{BACK_TO_TOP_LABEL}](#{OVERVIEW_ANCHOR})\n");
    out.push_str("---\n\n");
}

#[cfg(test)]
#[path = "tests/markdown_tests.rs"]
mod tests;
