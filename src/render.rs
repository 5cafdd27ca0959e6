//! Page pipeline: include expansion followed by command-menu injection.
//!
//! Both serve mode and build mode run a page through [`render_page`]: every
//! `data-include` directive is expanded, then the rendered command menu is
//! appended into the single element with `id="content"`. Pages without a
//! content root get includes only.

use std::path::Path;

use crate::commands;
use crate::include;
use crate::menu;

/// Attribute forms marking the element that receives the rendered menu.
/// Both quote styles are accepted, as for include directives.
const CONTENT_ROOT_ATTRS: [&str; 2] = ["id=\"content\"", "id='content'"];

/// Minimal HTML entity escaping for text content and attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Append `menu_html` inside the content-root element, if the page has one.
pub fn inject_menu(html: &str, menu_html: &str) -> String {
    let Some(attr_pos) = CONTENT_ROOT_ATTRS.iter().find_map(|attr| html.find(attr)) else {
        eprintln!("[menu] branch=skipped reason=no-content-root");
        return html.to_owned();
    };
    match include::append_offset(html, attr_pos) {
        Some(insert_at) => {
            let mut out = html.to_owned();
            out.insert_str(insert_at, menu_html);
            out
        }
        None => {
            eprintln!("[menu] branch=skipped reason=unclosed-content-root");
            html.to_owned()
        }
    }
}

/// Load the command catalog under `root` and render the menu, or the visible
/// fallback block when the catalog is missing or malformed.
async fn menu_html_for(root: &Path) -> String {
    let path = root.join(commands::COMMANDS_PATH);
    match commands::load_async(&path).await {
        Ok(doc) => {
            eprintln!(
                "[menu] path={} commands={} description_lines={}",
                path.display(),
                doc.commands.len(),
                doc.description.len()
            );
            menu::render_menu(&doc)
        }
        Err(e) => {
            eprintln!("[menu] path={} error={e}", path.display());
            menu::render_unavailable()
        }
    }
}

/// Run one page through the full pipeline: expand includes, then inject the
/// rendered command menu into the content root.
///
/// Injection happens last, so menu text is never scanned for directives and
/// a content root supplied by a fragment still receives the menu.
pub async fn render_page(root: &Path, page_html: &str) -> String {
    let expanded = include::expand_includes(page_html, root).await;
    let menu_html = menu_html_for(root).await;
    inject_menu(&expanded, &menu_html)
}

/// Generated stand-in page used when the docs root has no `index.html`:
/// a bare shell with a content root and the embedded assets.
pub fn build_shell(title: &str) -> String {
    let title = html_escape(title);
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n\
<link rel=\"stylesheet\" href=\"/assets/cmdocs.css\">\n\
</head>\n\
<body>\n\
<div id=\"content\"></div>\n\
<script src=\"/assets/cmdocs.js\"></script>\n\
</body>\n\
</html>\n"
    )
}

/// Render the site's index page: `<root>/index.html` when present, the
/// generated shell otherwise.
pub async fn render_index(root: &Path) -> String {
    let index = root.join("index.html");
    let page = match tokio::fs::read_to_string(&index).await {
        Ok(content) => {
            eprintln!("[index] path={} branch=file", index.display());
            content
        }
        Err(_) => {
            eprintln!("[index] path={} branch=shell", index.display());
            build_shell("Commands")
        }
    };
    render_page(root, &page).await
}
