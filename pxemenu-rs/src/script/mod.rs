//! iPXE menu script interpretation.
//!
//! Covers the subset of the iPXE script language needed to build a boot
//! menu from a remotely served script:
//!
//! - Label blocks (`:name`) and the `:variables` / `:menu` conventions
//! - `${name[:type]}` placeholder substitution
//! - `set`, `menu`, `item`, `iseq … && item …`, `choose`
//! - Preamble colour directives (`colour`, `cpair`)
//!
//! # Quick start
//!
//! ```rust
//! use pxemenu::script::{apply_assignments, interpret_menu, split_labels};
//! use pxemenu::var::VarStore;
//!
//! let src = ":variables\nset ver 2.1\n:menu\nmenu Boot ${ver}\nitem shell Shell\nchoose t";
//! let lines: Vec<&str> = src.lines().collect();
//! let labels = split_labels(&lines);
//! let mut vars = VarStore::new();
//! apply_assignments(&labels["variables"].lines, &mut vars);
//! let menu = interpret_menu(&labels["menu"].lines, &vars);
//! assert_eq!(menu.title, "Boot 2.1");
//! assert_eq!(menu.items[0].key, "shell");
//! ```

pub mod assign;
pub mod colors;
pub mod directive;
pub mod expand;
pub mod labels;
pub mod menu;

// Re-exports for convenience.
pub use assign::apply_assignments;
pub use colors::{build_colors, ColorEntry, ColorPair, ColorTables};
pub use directive::{parse_directive, Directive, ItemSpec};
pub use expand::substitute;
pub use labels::{split_labels, LabelBlock, LabelMap};
pub use menu::{interpret_menu, MenuInterpreter, MenuItem, MenuModel};
