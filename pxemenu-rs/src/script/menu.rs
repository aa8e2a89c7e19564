//! Menu block interpreter.
//!
//! Walks the lines of the `:menu` block and builds a [`MenuModel`]:
//!
//! - `menu <title>` sets the title (last one wins).
//! - `item <key> <label>` appends a selectable entry.
//! - `item --gap <label>` appends a separator; one whose label substitutes
//!   to nothing but whitespace is dropped.
//! - `iseq <lhs> <expected> && item …` appends the embedded item when the
//!   substituted `lhs` equals `expected` exactly.  The `|| …` alternative is
//!   never run, even when the comparison fails.
//! - `choose …` ends the walk; nothing after it is looked at.
//!
//! Keys are used verbatim; only titles and labels are substituted.

use serde::Serialize;
use tracing::debug;

use super::directive::{parse_clause, parse_directive, Directive, ItemSpec};
use super::expand::substitute;
use crate::error::MenuError;
use crate::var::VarStore;

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Empty for gap items.
    pub key: String,
    pub label: String,
    pub is_gap: bool,
}

impl MenuItem {
    pub fn entry(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into(), is_gap: false }
    }

    pub fn gap(label: impl Into<String>) -> Self {
        Self { key: String::new(), label: label.into(), is_gap: true }
    }
}

/// Title plus ordered items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuModel {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl MenuModel {
    /// The selectable (non-gap) item with `key`, if any.
    pub fn selectable(&self, key: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| !item.is_gap && item.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.items.is_empty()
    }
}

/// Stateful walker over a menu block.
pub struct MenuInterpreter<'v> {
    vars: &'v VarStore,
    model: MenuModel,
    diagnostics: Vec<MenuError>,
}

impl<'v> MenuInterpreter<'v> {
    pub fn new(vars: &'v VarStore) -> Self {
        Self { vars, model: MenuModel::default(), diagnostics: Vec::new() }
    }

    /// Interpret `lines` in order, stopping at the first `choose`.
    pub fn run<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        for line in lines {
            let line = line.as_ref();
            match parse_directive(line) {
                Ok(Directive::MenuTitle { title }) => {
                    self.model.title = substitute(title, self.vars);
                }
                Ok(Directive::Item(spec)) => self.push_item(spec),
                Ok(Directive::IseqItem { lhs, expected, clause, alternative }) => {
                    self.iseq(lhs, expected, clause, alternative);
                }
                Ok(Directive::Choose { target }) => {
                    debug!(choose = target, "choose reached, menu complete");
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    debug!("skipping menu line: {err}");
                    self.diagnostics.push(err);
                }
            }
        }
        self
    }

    /// The finished model and any diagnostics gathered on the way.
    pub fn finish(self) -> (MenuModel, Vec<MenuError>) {
        (self.model, self.diagnostics)
    }

    fn push_item(&mut self, spec: ItemSpec<'_>) {
        match spec {
            ItemSpec::Gap { label } => {
                let label = substitute(label, self.vars);
                if label.trim().is_empty() {
                    debug!("dropping empty gap item");
                    return;
                }
                self.model.items.push(MenuItem::gap(label));
            }
            ItemSpec::Entry { key, label } => {
                let label = substitute(label, self.vars);
                self.model.items.push(MenuItem::entry(key, label));
            }
        }
    }

    fn iseq(&mut self, lhs: &str, expected: &str, clause: &str, alternative: Option<&str>) {
        let actual = substitute(lhs, self.vars);
        if actual != expected {
            debug!(lhs, actual = %actual, expected, ?alternative, "iseq false, line skipped");
            return;
        }
        match parse_clause(clause) {
            Ok(Directive::Item(spec)) => self.push_item(spec),
            Ok(_) => debug!(clause, "iseq clause is not an item, ignored"),
            Err(err) => self.diagnostics.push(err),
        }
    }
}

/// Interpret a menu block against `vars`.
pub fn interpret_menu<S: AsRef<str>>(lines: &[S], vars: &VarStore) -> MenuModel {
    MenuInterpreter::new(vars).run(lines).finish().0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
