//! HTML for rows and the footer, matching the page's CSS hooks.

use crate::filter::Filter;
use crate::surface::{FooterView, RowView};
use std::fmt::Write;

/// Escape text for use in element content and quoted attributes.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One `<li>` for the todo list.
#[must_use]
pub fn row_html(row: &RowView) -> String {
    let classes: Vec<&str> = [
        (row.completed, "completed"),
        (row.hidden, "hidden"),
        (row.editing, "editing"),
    ]
    .into_iter()
    .filter_map(|(on, class)| on.then_some(class))
    .collect();

    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    };
    let checked = if row.completed { " checked" } else { "" };

    format!(
        "<li{class_attr}><div class=\"view\"><input class=\"check toggle\" type=\"checkbox\"{checked}>\
         <label class=\"todo-content\">{title}</label><button class=\"destroy\"></button></div>\
         <input class=\"edit todo-input\" value=\"{edit}\"></li>",
        title = escape(&row.title),
        edit = escape(&row.edit_value),
    )
}

/// `"1 item left"` / `"3 items left"`.
#[must_use]
pub fn remaining_label(remaining: usize) -> String {
    let noun = if remaining == 1 { "item" } else { "items" };
    format!("{remaining} {noun} left")
}

/// Footer stats, filter links and the clear-completed button.
///
/// Empty when there are no items; the footer is hidden then.
#[must_use]
pub fn footer_html(footer: &FooterView) -> String {
    if !footer.visible {
        return String::new();
    }

    let mut html = format!(
        "<footer class=\"footer\"><span class=\"todo-count\">{}</span><ul class=\"filters\">",
        remaining_label(footer.stats.remaining)
    );
    for filter in Filter::ALL {
        let selected = if filter == footer.selected {
            " class=\"selected\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<li><a{selected} href=\"{}\">{}</a></li>",
            filter.href(),
            filter.label()
        );
    }
    html.push_str("</ul>");
    if footer.stats.completed > 0 {
        let _ = write!(
            html,
            "<div class=\"todo-clear\"><button>Clear completed ({})</button></div>",
            footer.stats.completed
        );
    }
    html.push_str("</footer>");
    html
}
