//! Load cycle: raw script lines → render-ready menu.
//!
//! [`load`] is pure.  Every call starts from a fresh copy of the defaults
//! and returns a fully built [`LoadedMenu`]; nothing from a previous load
//! carries over.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{MenuError, Result};
use crate::script::{
    apply_assignments, build_colors, split_labels, substitute, ColorTables, LabelMap,
    MenuInterpreter, MenuModel,
};
use crate::var::VarStore;

/// Label whose `set` lines populate the variable store.
pub const VARIABLES_LABEL: &str = "variables";
/// Label whose lines define the menu.
pub const MENU_LABEL: &str = "menu";

/// Everything one load cycle produces.
#[derive(Debug, Default)]
pub struct LoadedMenu {
    pub menu: MenuModel,
    pub labels: LabelMap,
    pub colors: ColorTables,
    pub vars: VarStore,
    /// Non-fatal problems met while loading.
    pub diagnostics: Vec<MenuError>,
}

/// A resolved menu selection, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub key: String,
    pub label: String,
    /// The label block for `key`, substituted and newline-joined.  Empty when
    /// the script has no such label.
    pub block: String,
}

impl LoadedMenu {
    /// The state before any successful load: no title, items or labels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve a selection of `key`.
    ///
    /// Only non-gap items of the current menu can be selected; anything else
    /// is [`MenuError::NotFound`].
    pub fn select(&self, key: &str) -> Result<Selection> {
        let item = self
            .menu
            .selectable(key)
            .ok_or_else(|| MenuError::NotFound(key.to_owned()))?;
        Ok(Selection {
            key: item.key.clone(),
            label: item.label.clone(),
            block: self.block_text(key),
        })
    }

    /// The block for `label`, every line substituted, joined with `\n`.
    pub fn block_text(&self, label: &str) -> String {
        match self.labels.get(label) {
            Some(block) => block
                .lines
                .iter()
                .map(|line| substitute(line, &self.vars))
                .collect::<Vec<_>>()
                .join("\n"),
            None => String::new(),
        }
    }

    /// Label names in sorted order.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

/// Build a [`LoadedMenu`] from the raw lines of a script.
///
/// `defaults` seeds the variable store; `set` lines in the `:variables`
/// block are applied on top.  A script without a `:menu` block yields an
/// empty menu plus a [`MenuError::MissingLabel`] diagnostic.
pub fn load<S: AsRef<str>>(raw_lines: &[S], defaults: &VarStore) -> LoadedMenu {
    let (colors, mut diagnostics) = build_colors(raw_lines);
    let labels = split_labels(raw_lines);

    let mut vars = defaults.clone();
    if let Some(block) = labels.get(VARIABLES_LABEL) {
        diagnostics.extend(apply_assignments(&block.lines, &mut vars));
    }

    let menu = match labels.get(MENU_LABEL) {
        Some(block) => {
            let (menu, menu_diags) = MenuInterpreter::new(&vars).run(&block.lines).finish();
            diagnostics.extend(menu_diags);
            menu
        }
        None => {
            diagnostics.push(MenuError::MissingLabel(MENU_LABEL.to_owned()));
            MenuModel::default()
        }
    };

    for diag in &diagnostics {
        warn!("{diag}");
    }
    info!(
        title = %menu.title,
        items = menu.items.len(),
        labels = labels.len(),
        colors = colors.colors.len(),
        "menu loaded"
    );

    LoadedMenu { menu, labels, colors, vars, diagnostics }
}

/// Split fetched script text into lines.
pub fn script_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
