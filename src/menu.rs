//! Collapsible command-menu rendering.
//!
//! Each command in the catalog becomes one section: a clickable header with
//! an arrow icon and the command name, and a body panel with the rendered
//! description. Panel visibility and icon direction are pure functions of an
//! explicit per-section [`SectionState`]; the embedded client script flips
//! the same state on click (see `assets/cmdocs.js`).
//!
//! Description text is inserted as-is: the catalog is authored content, and
//! its lines may legitimately contain markup (`<b>`, entities).

use crate::commands::{CommandDocument, CommandEntry};

/// Icon shown on a collapsed section header.
pub const ARROW_DOWN: &str = "static/arrow-down.webp";
/// Icon shown on an expanded section header.
pub const ARROW_UP: &str = "static/arrow-up.webp";

/// Visibility state of one command section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionState {
    pub expanded: bool,
}

impl SectionState {
    /// The initial state of every section on page load.
    pub fn collapsed() -> Self {
        Self { expanded: false }
    }
}

/// Icon source for a section in the given state.
pub fn icon_src(state: SectionState) -> &'static str {
    if state.expanded {
        ARROW_UP
    } else {
        ARROW_DOWN
    }
}

/// CSS `display` value for a section body panel in the given state.
pub fn display_style(state: SectionState) -> &'static str {
    if state.expanded {
        "block"
    } else {
        "none"
    }
}

/// Join description lines with `</br>` and trailing `</br></br>` spacing.
///
/// An empty slice renders nothing at all (no stray spacing).
fn description_block(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    format!("{}</br></br>", lines.join("</br>"))
}

/// Render the body text of one command section: the command's own
/// description block, then each subcommand as `<b>NAME</b> - lines`.
pub fn entry_body(entry: &CommandEntry) -> String {
    let mut out = description_block(&entry.description);
    for (name, lines) in &entry.commands {
        out.push_str(&format!("<b>{}</b> - {}</br></br>", name, lines.join("</br>")));
    }
    out
}

/// Render one collapsible section for the command `name`.
pub fn render_section(name: &str, entry: &CommandEntry, state: SectionState) -> String {
    format!(
        "<div class=\"command-container\" data-expanded=\"{expanded}\">\n\
<div class=\"command-label-container\">\
<img class=\"arrow\" src=\"{icon}\" alt=\"\">\
<h1 class=\"command-label\">{name}</h1>\
</div>\n\
<div class=\"command-description-container\" style=\"display:{display}\">\
<p class=\"text command-description\">{body}</p>\
</div>\n\
</div>\n",
        expanded = state.expanded,
        icon = icon_src(state),
        display = display_style(state),
        body = entry_body(entry),
    )
}

/// Render the full menu: the catalog's top-level description block, then one
/// collapsed section per command, in catalog order.
pub fn render_menu(doc: &CommandDocument) -> String {
    let mut html = String::new();
    let top = description_block(&doc.description);
    if !top.is_empty() {
        html.push_str(&format!("<p class=\"text menu-description\">{top}</p>\n"));
    }
    for (name, entry) in &doc.commands {
        html.push_str(&render_section(name, entry, SectionState::collapsed()));
    }
    html
}

/// Visible fallback for a missing or unreadable catalog.
///
/// Rendered into the content root instead of leaving it blank, so a broken
/// deployment is diagnosable from the page itself.
pub fn render_unavailable() -> String {
    "<p class=\"text menu-unavailable\">commands unavailable</p>\n".to_owned()
}
