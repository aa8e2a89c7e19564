//! Line tokenizer for the supported iPXE directive subset.
//!
//! Each script line is classified into a [`Directive`] before any
//! interpretation happens.  The interpreters (`assign`, `colors`, `menu`)
//! then dispatch on the variant and ignore whatever isn't theirs.
//!
//! | Line shape                                               | Variant        |
//! |----------------------------------------------------------|----------------|
//! | `:name …`                                                | `Label`        |
//! | `set name[:type] value…`                                 | `SetVar`       |
//! | `menu title…`                                            | `MenuTitle`    |
//! | `item [--gap] key label…` / `item --gap label…`          | `Item`         |
//! | `iseq lhs expected && item … [\|\| alternative]`          | `IseqItem`     |
//! | `choose …`                                               | `Choose`       |
//! | `colour --rgb <hex> <index>`                             | `ColourDef`    |
//! | `cpair --foreground <fg> --background <bg> <pair>`       | `CpairDef`     |
//!
//! `set`, `menu`, `item`, `iseq` and `choose` match case-insensitively;
//! `colour` and `cpair` are case-sensitive.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::MenuError;

/// Character that introduces a label marker line.
pub const LABEL_MARKER: char = ':';

/// A classified script line.  Borrowed slices point into the source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `:name`
    Label { name: &'a str },
    /// `set name[:type] value`: `name` has the type tag stripped, `value`
    /// is the raw (unsubstituted) remainder.
    SetVar { name: &'a str, value: &'a str },
    /// `menu title`
    MenuTitle { title: &'a str },
    /// `item …`
    Item(ItemSpec<'a>),
    /// `iseq lhs expected && clause [|| alternative]`
    IseqItem {
        lhs: &'a str,
        expected: &'a str,
        /// Text after `&&`, cut at the first ` ||`.
        clause: &'a str,
        /// Text after ` ||`.  Parsed, never executed.
        alternative: Option<&'a str>,
    },
    /// `choose …`
    Choose { target: &'a str },
    /// `colour --rgb <hex> <index>` (`hex` without any `0x` prefix)
    ColourDef { rgb: &'a str, index: &'a str },
    /// `cpair --foreground <fg> --background <bg> <pair>`
    CpairDef { foreground: &'a str, background: &'a str, pair: &'a str },
    /// Anything else.
    Unknown,
}

/// The argument shape of an `item` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSpec<'a> {
    /// `item --gap label`, a non-selectable separator.
    Gap { label: &'a str },
    /// `item key label`
    Entry { key: &'a str, label: &'a str },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Classify one script line.
///
/// Returns [`MenuError::MalformedDirective`] when a recognised keyword is
/// followed by arguments of the wrong shape.
pub fn parse_directive(line: &str) -> Result<Directive<'_>, MenuError> {
    let line = line.trim_end();
    if let Some(name) = label_name(line) {
        return Ok(Directive::Label { name });
    }

    let trimmed = line.trim_start();
    if has_prefix_ci(trimmed, "set ") {
        return parse_set(trimmed);
    }
    if has_prefix_ci(trimmed, "menu ") {
        return Ok(Directive::MenuTitle { title: trimmed[5..].trim_start() });
    }

    let (word, rest) = split_first_word(trimmed);
    if word.eq_ignore_ascii_case("item") {
        return parse_item_args(rest, trimmed).map(Directive::Item);
    }
    if word.eq_ignore_ascii_case("iseq") {
        return parse_iseq(rest, trimmed);
    }
    if has_prefix_ci(trimmed, "choose") {
        return Ok(Directive::Choose { target: trimmed[6..].trim() });
    }
    match word {
        "colour" => parse_colour(trimmed),
        "cpair" => parse_cpair(trimmed),
        _ => Ok(Directive::Unknown),
    }
}

/// Classify the clause embedded in an `iseq` line.
///
/// Unlike [`parse_directive`], trailing whitespace is kept so that a clause
/// such as `item foo ` (cut just before ` ||`) yields an entry with an empty
/// label rather than a malformed item.
pub fn parse_clause(clause: &str) -> Result<Directive<'_>, MenuError> {
    let trimmed = clause.trim_start();
    let (word, rest) = split_first_word(trimmed);
    if word.eq_ignore_ascii_case("item") {
        return parse_item_args(rest, trimmed).map(Directive::Item);
    }
    parse_directive(trimmed)
}

/// If `line` is a label marker, return the label name.
///
/// A marker starts with `:` in the first column; the name is the first
/// whitespace-delimited token with the `:` removed.
pub fn label_name(line: &str) -> Option<&str> {
    if !line.starts_with(LABEL_MARKER) {
        return None;
    }
    let first = line.split_whitespace().next().unwrap_or(line);
    Some(&first[LABEL_MARKER.len_utf8()..])
}

/// Returns `true` if `line` is a label marker line.
pub fn is_label_marker(line: &str) -> bool {
    line.starts_with(LABEL_MARKER)
}

// ── Per-keyword parsers ───────────────────────────────────────────────────────

fn parse_set(line: &str) -> Result<Directive<'_>, MenuError> {
    let (name_full, value) = split_first_word(line[4..].trim_start());
    if name_full.is_empty() || value.is_empty() {
        return Err(MenuError::malformed(line, "expected `set <name>[:<type>] <value>`"));
    }
    let name = name_full.split(':').next().unwrap_or(name_full);
    if name.is_empty() {
        return Err(MenuError::malformed(line, "variable name cannot be empty"));
    }
    Ok(Directive::SetVar { name, value })
}

/// `rest` is everything after the `item` keyword with leading whitespace
/// already removed.
fn parse_item_args<'a>(rest: &'a str, line: &str) -> Result<ItemSpec<'a>, MenuError> {
    if rest.is_empty() {
        return Err(MenuError::malformed(line, "`item` requires arguments"));
    }
    if has_prefix_ci(rest, "--gap") {
        return Ok(ItemSpec::Gap { label: rest[5..].trim_start() });
    }
    match rest.find(char::is_whitespace) {
        Some(pos) => Ok(ItemSpec::Entry {
            key: &rest[..pos],
            label: rest[pos..].trim_start(),
        }),
        None => Err(MenuError::malformed(line, "expected `item <key> <label>`")),
    }
}

fn parse_iseq<'a>(rest: &'a str, line: &str) -> Result<Directive<'a>, MenuError> {
    let Some(and_pos) = rest.find("&&") else {
        return Err(MenuError::malformed(line, "`iseq` without `&&` clause"));
    };
    let mut operands = rest[..and_pos].split_whitespace();
    let (Some(lhs), Some(expected), None) = (operands.next(), operands.next(), operands.next())
    else {
        return Err(MenuError::malformed(line, "expected `iseq <value> <value> && …`"));
    };

    let after = rest[and_pos + 2..].trim_start();
    let (clause, alternative) = match after.find(" ||") {
        Some(pos) => {
            let alt = after[pos + 3..].trim();
            (&after[..pos], (!alt.is_empty()).then_some(alt))
        }
        None => (after, None),
    };
    if clause.trim().is_empty() {
        return Err(MenuError::malformed(line, "`iseq` with empty `&&` clause"));
    }
    Ok(Directive::IseqItem { lhs, expected, clause, alternative })
}

fn colour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^colour\s+--rgb\s+(?:0[xX])?([0-9A-Fa-f]+)\s+(\S+)")
            .expect("colour pattern is valid")
    })
}

fn cpair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^cpair\s+--foreground\s+(\S+)\s+--background\s+(\S+)\s+(\S+)")
            .expect("cpair pattern is valid")
    })
}

fn parse_colour(line: &str) -> Result<Directive<'_>, MenuError> {
    let caps = colour_re()
        .captures(line)
        .ok_or_else(|| MenuError::malformed(line, "expected `colour --rgb <hex> <index>`"))?;
    let (Some(rgb), Some(index)) = (caps.get(1), caps.get(2)) else {
        return Err(MenuError::malformed(line, "expected `colour --rgb <hex> <index>`"));
    };
    Ok(Directive::ColourDef { rgb: rgb.as_str(), index: index.as_str() })
}

fn parse_cpair(line: &str) -> Result<Directive<'_>, MenuError> {
    const SHAPE: &str = "expected `cpair --foreground <idx> --background <idx> <pair>`";
    let caps = cpair_re().captures(line).ok_or_else(|| MenuError::malformed(line, SHAPE))?;
    let (Some(fg), Some(bg), Some(pair)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(MenuError::malformed(line, SHAPE));
    };
    Ok(Directive::CpairDef {
        foreground: fg.as_str(),
        background: bg.as_str(),
        pair: pair.as_str(),
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Split `s` at its first whitespace run, returning the first word and the
/// remainder with leading whitespace removed.
fn split_first_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim_start()),
        None => (s, ""),
    }
}

/// ASCII case-insensitive `starts_with`.
fn has_prefix_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Directive<'_> {
        parse_directive(line).expect("parse failed")
    }

    // -- labels ---------------------------------------------------------------

    #[test]
    fn label_marker() {
        assert_eq!(parse(":menu"), Directive::Label { name: "menu" });
        assert_eq!(parse(":linux  extra words"), Directive::Label { name: "linux" });
        assert_eq!(parse(":"), Directive::Label { name: "" });
    }

    #[test]
    fn indented_colon_is_not_a_label() {
        assert_eq!(parse("  :menu"), Directive::Unknown);
        assert!(!is_label_marker("  :menu"));
    }

    // -- set ------------------------------------------------------------------

    #[test]
    fn set_strips_type() {
        assert_eq!(parse("set space:hex 20:20"), Directive::SetVar { name: "space", value: "20:20" });
    }

    #[test]
    fn set_value_keeps_inner_whitespace() {
        assert_eq!(
            parse("  SET  greeting   hello   world  "),
            Directive::SetVar { name: "greeting", value: "hello   world" }
        );
    }

    #[test]
    fn set_too_few_tokens_is_malformed() {
        assert!(matches!(
            parse_directive("set lonely"),
            Err(MenuError::MalformedDirective { .. })
        ));
        assert!(parse_directive("set :hex 1").is_err());
    }

    #[test]
    fn set_needs_space_after_keyword() {
        assert_eq!(parse("settings x y"), Directive::Unknown);
    }

    // -- menu / choose --------------------------------------------------------

    #[test]
    fn menu_title() {
        assert_eq!(parse("menu   Boot ${version}"), Directive::MenuTitle { title: "Boot ${version}" });
        assert_eq!(parse("MENU Main"), Directive::MenuTitle { title: "Main" });
        assert_eq!(parse("menu"), Directive::Unknown);
    }

    #[test]
    fn choose_prefix() {
        assert_eq!(parse("choose target"), Directive::Choose { target: "target" });
        assert_eq!(parse("Choose --default x target"), Directive::Choose { target: "--default x target" });
        assert_eq!(parse("choose"), Directive::Choose { target: "" });
    }

    // -- item -----------------------------------------------------------------

    #[test]
    fn item_entry() {
        assert_eq!(
            parse("item opt1 First Option"),
            Directive::Item(ItemSpec::Entry { key: "opt1", label: "First Option" })
        );
    }

    #[test]
    fn item_gap() {
        assert_eq!(parse("item --gap Separator"), Directive::Item(ItemSpec::Gap { label: "Separator" }));
        assert_eq!(parse("ITEM --GAP"), Directive::Item(ItemSpec::Gap { label: "" }));
        assert_eq!(parse("item --gap -- Tools --"), Directive::Item(ItemSpec::Gap { label: "-- Tools --" }));
    }

    #[test]
    fn item_without_label_is_malformed() {
        assert!(parse_directive("item lonely").is_err());
        assert!(parse_directive("item").is_err());
    }

    #[test]
    fn items_keyword_is_unknown() {
        assert_eq!(parse("items a b"), Directive::Unknown);
    }

    // -- iseq -----------------------------------------------------------------

    #[test]
    fn iseq_with_alternative() {
        assert_eq!(
            parse("iseq ${platform} efi && item foo Label || item bar Other"),
            Directive::IseqItem {
                lhs: "${platform}",
                expected: "efi",
                clause: "item foo Label",
                alternative: Some("item bar Other"),
            }
        );
    }

    #[test]
    fn iseq_without_alternative() {
        assert_eq!(
            parse("iseq ${arch} x86_64 && item linux64 Linux (64-bit)"),
            Directive::IseqItem {
                lhs: "${arch}",
                expected: "x86_64",
                clause: "item linux64 Linux (64-bit)",
                alternative: None,
            }
        );
    }

    #[test]
    fn iseq_trailing_bars_have_no_alternative() {
        let Directive::IseqItem { clause, alternative, .. } = parse("iseq a a && item k Label ||") else {
            panic!("expected iseq");
        };
        assert_eq!(clause, "item k Label");
        assert_eq!(alternative, None);
    }

    #[test]
    fn iseq_malformed() {
        assert!(parse_directive("iseq a b item x y").is_err());
        assert!(parse_directive("iseq a && item x y").is_err());
        assert!(parse_directive("iseq a b c && item x y").is_err());
        assert!(parse_directive("iseq a b &&").is_err());
    }

    #[test]
    fn clause_keeps_trailing_space() {
        assert_eq!(
            parse_clause("item foo ").expect("clause"),
            Directive::Item(ItemSpec::Entry { key: "foo", label: "" })
        );
        assert_eq!(parse_clause("goto somewhere").expect("clause"), Directive::Unknown);
    }

    // -- colours --------------------------------------------------------------

    #[test]
    fn colour_def() {
        assert_eq!(parse("colour --rgb ff0000 1"), Directive::ColourDef { rgb: "ff0000", index: "1" });
        assert_eq!(parse("colour --rgb 0x336699 04"), Directive::ColourDef { rgb: "336699", index: "04" });
    }

    #[test]
    fn colour_is_case_sensitive() {
        assert_eq!(parse("COLOUR --rgb ff0000 1"), Directive::Unknown);
    }

    #[test]
    fn colour_wrong_shape() {
        assert!(parse_directive("colour --basic 4 1").is_err());
    }

    #[test]
    fn cpair_def() {
        assert_eq!(
            parse("cpair --foreground 7 --background 2 1"),
            Directive::CpairDef { foreground: "7", background: "2", pair: "1" }
        );
    }

    #[test]
    fn cpair_wrong_order_is_malformed() {
        assert!(matches!(
            parse_directive("cpair --background 2 --foreground 7 1"),
            Err(MenuError::MalformedDirective { .. })
        ));
    }

    #[test]
    fn unknown_lines() {
        assert_eq!(parse("#!ipxe"), Directive::Unknown);
        assert_eq!(parse("kernel ${base}/vmlinuz"), Directive::Unknown);
        assert_eq!(parse("goto menu"), Directive::Unknown);
    }
}
