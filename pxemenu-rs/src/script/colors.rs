//! Colour table builder.
//!
//! Scans the script preamble (everything before the first label marker) for
//! `colour --rgb <hex> <index>` and `cpair --foreground <fg> --background
//! <bg> <pair>` directives.  Pair references are resolved against the colour
//! table at the moment the `cpair` line is read; redefining a colour later
//! does not change pairs built from it.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::directive::{parse_directive, Directive};
use super::labels::preamble;
use crate::error::MenuError;

/// Foreground used when a pair references an undefined colour.
pub const DEFAULT_FOREGROUND: &str = "#ffffff";
const RED: &str = "#ff0000";
const GREEN: &str = "#00ff00";

/// One palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    /// The index exactly as written in the script.
    pub index: String,
    /// `#rrggbb`
    pub rgb: String,
}

/// A foreground/background combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub index: String,
    pub foreground: ColorEntry,
    pub background: ColorEntry,
}

/// Palette and pair tables, keyed by index as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorTables {
    pub colors: BTreeMap<String, String>,
    pub pairs: BTreeMap<String, ColorPair>,
}

impl ColorTables {
    pub fn color(&self, index: &str) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn pair(&self, index: &str) -> Option<&ColorPair> {
        self.pairs.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.pairs.is_empty()
    }

    fn entry_or(&self, index: &str, fallback: &str) -> ColorEntry {
        ColorEntry {
            index: index.to_owned(),
            rgb: self.color(index).unwrap_or(fallback).to_owned(),
        }
    }
}

/// Background used when a pair references an undefined colour.
///
/// Index `2` falls back to green; every other index falls back to red.
pub fn default_background(index: &str) -> &'static str {
    match index {
        "2" => GREEN,
        _ => RED,
    }
}

/// Build colour tables from the preamble of `lines`.
///
/// Returns the tables plus a diagnostic for every malformed `cpair` line.
pub fn build_colors<S: AsRef<str>>(lines: &[S]) -> (ColorTables, Vec<MenuError>) {
    let mut tables = ColorTables::default();
    let mut diagnostics = Vec::new();

    for line in preamble(lines) {
        match parse_directive(line) {
            Ok(Directive::ColourDef { rgb, index }) => {
                tables.colors.insert(index.to_owned(), format!("#{rgb}"));
            }
            Ok(Directive::CpairDef { foreground, background, pair }) => {
                let fg = tables.entry_or(foreground, DEFAULT_FOREGROUND);
                let bg = tables.entry_or(background, default_background(background));
                tables.pairs.insert(
                    pair.to_owned(),
                    ColorPair { index: pair.to_owned(), foreground: fg, background: bg },
                );
            }
            Ok(_) => {}
            Err(err) => {
                if line.trim_start().starts_with("cpair") {
                    warn!("{err}");
                    diagnostics.push(err);
                } else {
                    debug!("ignoring preamble line: {err}");
                }
            }
        }
    }
    (tables, diagnostics)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build(src: &str) -> (ColorTables, Vec<MenuError>) {
        let lines: Vec<&str> = src.lines().collect();
        build_colors(&lines)
    }

    #[test]
    fn palette_entries() {
        let (t, diags) = build("#!ipxe\ncolour --rgb ff8800 1\ncolour --rgb 0x336699 04\n");
        assert!(diags.is_empty());
        assert_eq!(t.color("1"), Some("#ff8800"));
        assert_eq!(t.color("04"), Some("#336699"));
        assert_eq!(t.color("4"), None);
    }

    #[test]
    fn pair_resolves_defined_colours() {
        let (t, _) = build("colour --rgb 112233 3\ncolour --rgb 445566 4\ncpair --foreground 3 --background 4 0");
        let p = t.pair("0").unwrap();
        assert_eq!(p.foreground, ColorEntry { index: "3".into(), rgb: "#112233".into() });
        assert_eq!(p.background, ColorEntry { index: "4".into(), rgb: "#445566".into() });
    }

    #[test]
    fn pair_defaults_for_missing_colours() {
        let (t, _) = build(
            "cpair --foreground 7 --background 1 0\n\
             cpair --foreground 7 --background 2 1\n\
             cpair --foreground 7 --background 9 2",
        );
        assert_eq!(t.pair("0").unwrap().foreground.rgb, "#ffffff");
        assert_eq!(t.pair("0").unwrap().background.rgb, "#ff0000");
        assert_eq!(t.pair("1").unwrap().background.rgb, "#00ff00");
        assert_eq!(t.pair("2").unwrap().background.rgb, "#ff0000");
    }

    #[test]
    fn pair_snapshot_semantics() {
        let (t, _) = build(
            "colour --rgb 000001 1\n\
             cpair --foreground 1 --background 1 0\n\
             colour --rgb 000002 1",
        );
        assert_eq!(t.color("1"), Some("#000002"));
        assert_eq!(t.pair("0").unwrap().foreground.rgb, "#000001");
    }

    #[test]
    fn pair_before_colour_uses_defaults() {
        let (t, _) = build("cpair --foreground 5 --background 6 0\ncolour --rgb abcdef 5");
        assert_eq!(t.pair("0").unwrap().foreground.rgb, "#ffffff");
    }

    #[test]
    fn stops_at_first_label() {
        let (t, _) = build("colour --rgb 111111 1\n:menu\ncolour --rgb 222222 2\ncpair --foreground 1 --background 2 0");
        assert_eq!(t.colors.len(), 1);
        assert!(t.pairs.is_empty());
    }

    #[test]
    fn malformed_cpair_reported() {
        let (t, diags) = build("cpair --background 1 --foreground 2 0\ncpair --foreground 1");
        assert!(t.pairs.is_empty());
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| matches!(d, MenuError::MalformedDirective { .. })));
    }

    #[test]
    fn malformed_colour_ignored_quietly() {
        let (t, diags) = build("colour --basic 4 1\nset x y\nitem a b");
        assert!(t.is_empty());
        assert!(diags.is_empty());
    }
}
