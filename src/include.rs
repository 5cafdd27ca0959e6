//! Include-directive expansion.
//!
//! A page element marked `data-include="name"` receives the content of
//! `templates/name.html`, spliced in before the element's closing tag. Each
//! directive resolves independently and concurrently; no ordering holds
//! between distinct directives, and one directive's fragment never lands in
//! another's element.
//!
//! The scanner is a string-level pass, not an HTML parser: directive
//! elements are author-controlled placeholders, and attribute values are
//! assumed not to contain `>`. Nested same-named tags inside a directive
//! element are handled by depth counting.

use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

/// Visible marker spliced in when a fragment cannot be read.
pub const FALLBACK: &str = "<span class=\"include-unavailable\">unavailable</span>";

const ATTR: &str = "data-include=";

/// One discovered include directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Fragment identifier, verbatim from the attribute value.
    pub name: String,
    /// Byte offset of the element's closing tag; fragment content is
    /// inserted here.
    pub insert_at: usize,
}

/// Fragment identifiers are a single path component: letters, digits,
/// hyphen, underscore. Anything else (separators, dots) is rejected so a
/// directive can never resolve outside the templates directory.
fn valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve a fragment identifier to its path under the docs root.
pub fn fragment_path(root: &Path, name: &str) -> PathBuf {
    root.join("templates").join(format!("{name}.html"))
}

/// Case-insensitive ASCII prefix match; returns the remainder on success.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Find the byte offset of the `</tag>` that closes an element whose opening
/// tag ends at `from`, counting nested same-named elements. Self-closing
/// `<tag .../>` occurrences do not affect depth.
fn close_tag_offset(html: &str, tag: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = from;
    loop {
        let pos = i + html[i..].find('<')?;
        let rest = &html[pos + 1..];
        if let Some(after_slash) = rest.strip_prefix('/') {
            if let Some(after_tag) = strip_prefix_ci(after_slash, tag) {
                if after_tag.trim_start().starts_with('>') {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
            }
        } else if let Some(after_tag) = strip_prefix_ci(rest, tag) {
            let at_boundary = after_tag
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/');
            if at_boundary {
                let end = pos + html[pos..].find('>')?;
                if !html[pos..end].ends_with('/') {
                    depth += 1;
                }
            }
        }
        i = pos + 1;
    }
}

/// Locate the append position for the element whose opening tag contains the
/// attribute at `attr_pos`: the byte offset of its closing tag.
///
/// Returns `None` when the attribute is not inside a well-formed opening tag
/// or the element is self-closing (nothing can be appended to it).
pub(crate) fn append_offset(html: &str, attr_pos: usize) -> Option<usize> {
    let open = html[..attr_pos].rfind('<')?;
    let tag: String = html[open + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag.is_empty() {
        return None;
    }
    let open_end = open + html[open..].find('>')? + 1;
    if open_end <= attr_pos {
        // The nearest tag closed before the attribute: attribute is in text.
        return None;
    }
    if html[open..open_end - 1].ends_with('/') {
        return None;
    }
    close_tag_offset(html, &tag, open_end)
}

/// Scan a page for include directives, in append-position order.
///
/// Malformed directives (bad identifier, unclosed or self-closing element)
/// are logged and skipped; the rest of the page is unaffected.
pub fn find_directives(html: &str) -> Vec<Directive> {
    let mut out: Vec<Directive> = Vec::new();
    let mut i = 0;
    while let Some(rel) = html[i..].find(ATTR) {
        let attr = i + rel;
        let value = attr + ATTR.len();
        i = value;

        let quote = match html[value..].chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => continue,
        };
        let Some(qlen) = html[value + 1..].find(quote) else {
            break;
        };
        let name = &html[value + 1..value + 1 + qlen];
        i = value + 1 + qlen + 1;

        if !valid_identifier(name) {
            eprintln!("[include] name={name} branch=denied reason=invalid-identifier");
            continue;
        }
        match append_offset(html, attr) {
            Some(insert_at) => out.push(Directive {
                name: name.to_owned(),
                insert_at,
            }),
            None => {
                eprintln!("[include] name={name} branch=denied reason=unclosed-element");
            }
        }
    }
    out.sort_by_key(|d| d.insert_at);
    out
}

/// Expand every include directive in `html` against the docs root.
///
/// Fragments are read concurrently; a failed read is logged and replaced
/// with [`FALLBACK`] so the gap is visible rather than silent. Splicing
/// happens back-to-front so earlier byte offsets stay valid.
pub async fn expand_includes(html: &str, root: &Path) -> String {
    let directives = find_directives(html);
    if directives.is_empty() {
        return html.to_owned();
    }

    let mut set: JoinSet<(usize, String, std::io::Result<String>)> = JoinSet::new();
    for (idx, directive) in directives.iter().enumerate() {
        let path = fragment_path(root, &directive.name);
        let name = directive.name.clone();
        set.spawn(async move {
            let result = tokio::fs::read_to_string(&path).await;
            (idx, name, result)
        });
    }

    let mut fragments: Vec<String> = vec![String::new(); directives.len()];
    while let Some(joined) = set.join_next().await {
        let Ok((idx, name, result)) = joined else {
            continue;
        };
        fragments[idx] = match result {
            Ok(content) => {
                eprintln!("[include] name={name} bytes={}", content.len());
                content
            }
            Err(e) => {
                eprintln!("[include] name={name} error={e}");
                FALLBACK.to_owned()
            }
        };
    }

    let mut out = html.to_owned();
    for (directive, fragment) in directives.iter().zip(&fragments).rev() {
        out.insert_str(directive.insert_at, fragment);
    }
    out
}
