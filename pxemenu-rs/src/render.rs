//! Terminal output for a loaded menu.
//!
//! Four views are provided:
//!
//! * the menu itself (title, blank line, one line per item),
//! * a resolved [`Selection`],
//! * a JSON dump of the model and colour tables,
//! * the sorted list of label names.
//!
//! Colour is applied with crossterm styles.  With colour off every view is
//! plain text, which is also what the tests compare against.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, ContentStyle, Print, ResetColor, SetStyle},
};
use serde::Serialize;

use crate::load::{LoadedMenu, Selection};
use crate::script::{ColorPair, MenuItem};

/// Colour used for gap items.
pub const GAP_RGB: &str = "#888888";
/// Pair index applied to the title and selectable items when defined.
pub const MENU_PAIR: &str = "0";

const NO_DATA: &str = "No data for the selected item.";

/// Parse `#rrggbb` into a crossterm colour.
pub fn rgb_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

/// Style for a colour pair.  Entries that do not parse are left unset.
pub fn pair_style(pair: &ColorPair) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = rgb_color(&pair.foreground.rgb);
    style.background_color = rgb_color(&pair.background.rgb);
    style
}

fn gap_style() -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = rgb_color(GAP_RGB);
    style
}

#[derive(Serialize)]
struct MenuView<'a> {
    title: &'a str,
    items: &'a [MenuItem],
    colors: &'a BTreeMap<String, String>,
    pairs: &'a BTreeMap<String, ColorPair>,
}

/// Writes menu views to any [`Write`] sink.
pub struct Renderer<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str, style: Option<ContentStyle>) -> io::Result<()> {
        match style {
            Some(style) if self.color => {
                queue!(self.out, SetStyle(style), Print(text), ResetColor, Print('\n'))
            }
            _ => writeln!(self.out, "{text}"),
        }
    }

    /// Title, a blank line, then every item in order.
    pub fn menu(&mut self, loaded: &LoadedMenu) -> io::Result<()> {
        let menu_style = loaded.colors.pair(MENU_PAIR).map(pair_style);
        self.line(&loaded.menu.title, menu_style)?;
        self.line("", None)?;
        for item in &loaded.menu.items {
            if item.is_gap {
                self.line(&item.label, Some(gap_style()))?;
            } else {
                self.line(&format!("  {}  {}", item.key, item.label), menu_style)?;
            }
        }
        self.out.flush()
    }

    /// `Option: <key> - <label>` followed by the block text.
    pub fn selection(&mut self, selection: &Selection) -> io::Result<()> {
        self.line(&format!("Option: {} - {}", selection.key, selection.label), None)?;
        if selection.block.is_empty() {
            self.line(NO_DATA, None)?;
        } else {
            self.line(&selection.block, None)?;
        }
        self.out.flush()
    }

    /// Pretty-printed JSON of the menu and its colour tables.
    pub fn json(&mut self, loaded: &LoadedMenu) -> io::Result<()> {
        let view = MenuView {
            title: &loaded.menu.title,
            items: &loaded.menu.items,
            colors: &loaded.colors.colors,
            pairs: &loaded.colors.pairs,
        };
        serde_json::to_writer_pretty(&mut self.out, &view)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Label names, one per line.
    pub fn labels(&mut self, loaded: &LoadedMenu) -> io::Result<()> {
        for name in loaded.label_names() {
            writeln!(self.out, "{name}")?;
        }
        self.out.flush()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;
    use crate::var::VarStore;

    const SCRIPT: &[&str] = &[
        "colour --rgb 112233 1",
        "colour --rgb 445566 2",
        "cpair --foreground 1 --background 2 0",
        ":menu",
        "menu Boot",
        "item a Alpha",
        "item --gap --",
        "item b Beta",
        ":a",
        "echo a",
    ];

    fn render(color: bool, f: impl FnOnce(&mut Renderer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut r = Renderer::new(Vec::new(), color);
        f(&mut r).unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn parse_rgb() {
        assert_eq!(rgb_color("#ff8000"), Some(Color::Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(rgb_color("#888888"), Some(Color::Rgb { r: 136, g: 136, b: 136 }));
        assert_eq!(rgb_color("ff8000"), None);
        assert_eq!(rgb_color("#fff"), None);
        assert_eq!(rgb_color("#gg0000"), None);
    }

    #[test]
    fn pair_style_uses_both_colors() {
        let loaded = load(SCRIPT, &VarStore::new());
        let style = pair_style(loaded.colors.pair("0").unwrap());
        assert_eq!(style.foreground_color, Some(Color::Rgb { r: 0x11, g: 0x22, b: 0x33 }));
        assert_eq!(style.background_color, Some(Color::Rgb { r: 0x44, g: 0x55, b: 0x66 }));
    }

    #[test]
    fn plain_menu_view() {
        let loaded = load(SCRIPT, &VarStore::new());
        let out = render(false, |r| r.menu(&loaded));
        assert_eq!(out, "Boot\n\n  a  Alpha\n--\n  b  Beta\n");
    }

    #[test]
    fn colored_menu_view_dims_gaps() {
        let loaded = load(SCRIPT, &VarStore::new());
        let out = render(true, |r| r.menu(&loaded));
        assert!(out.contains("38;2;136;136;136"), "{out:?}");
        assert!(out.contains("38;2;17;34;51"), "{out:?}");
        assert!(out.contains("Alpha"));
    }

    #[test]
    fn empty_menu_view() {
        let out = render(false, |r| r.menu(&LoadedMenu::empty()));
        assert_eq!(out, "\n\n");
    }

    #[test]
    fn selection_views() {
        let loaded = load(SCRIPT, &VarStore::new());
        let out = render(false, |r| r.selection(&loaded.select("a").unwrap()));
        assert_eq!(out, "Option: a - Alpha\n:a\necho a\n");

        let out = render(false, |r| r.selection(&loaded.select("b").unwrap()));
        assert_eq!(out, "Option: b - Beta\nNo data for the selected item.\n");
    }

    #[test]
    fn json_view() {
        let loaded = load(SCRIPT, &VarStore::new());
        let out = render(false, |r| r.json(&loaded));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "Boot");
        assert_eq!(value["items"][1]["is_gap"], true);
        assert_eq!(value["items"][2]["key"], "b");
        assert_eq!(value["colors"]["1"], "#112233");
        assert_eq!(value["pairs"]["0"]["background"]["rgb"], "#445566");
    }

    #[test]
    fn label_listing() {
        let loaded = load(SCRIPT, &VarStore::new());
        let out = render(false, |r| r.labels(&loaded));
        assert_eq!(out, "a\nmenu\n");
    }
}
