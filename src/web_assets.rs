//! Embedded static web assets for the cmdocs serve mode.
//!
//! Both files are compiled into the binary via `include_str!` so the binary
//! is fully self-contained; no external asset files need to be distributed.

/// Stylesheet for the command-menu page.
///
/// Loaded from `src/assets/cmdocs.css` at compile time.
pub const CSS: &str = include_str!("assets/cmdocs.css");

/// Client script for the command-menu page.
///
/// Handles section toggling: each section carries an explicit
/// `data-expanded` flag, and icon plus panel visibility are derived from it.
/// Loaded from `src/assets/cmdocs.js` at compile time.
pub const JS: &str = include_str!("assets/cmdocs.js");
