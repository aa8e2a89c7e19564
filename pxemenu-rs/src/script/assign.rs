//! `set` directive processing.
//!
//! Values are substituted eagerly, against the store as it stands when the
//! `set` line is reached: a value may reference variables assigned earlier in
//! the same block, but not ones assigned further down.

use tracing::debug;

use super::directive::{parse_directive, Directive};
use super::expand::{substitute, SPACE_RUN};
use crate::error::MenuError;
use crate::var::VarStore;

/// A resolved value equal to this literal is stored as [`SPACE_RUN`].
///
/// Scripts write `set space:hex 20:20` to get a raw hex-encoded pair of
/// spaces; it is widened to the same four-space run `${space}` produces.
pub const HEX_SPACE_LITERAL: &str = "20:20";

/// Apply every `set` line in `lines` to `vars`, in order.
///
/// Non-`set` lines are ignored.  Malformed `set` lines are skipped and
/// returned as diagnostics.
pub fn apply_assignments<S: AsRef<str>>(lines: &[S], vars: &mut VarStore) -> Vec<MenuError> {
    let mut diagnostics = Vec::new();
    for line in lines {
        match parse_directive(line.as_ref()) {
            Ok(Directive::SetVar { name, value }) => {
                let mut resolved = substitute(value, vars);
                if resolved == HEX_SPACE_LITERAL {
                    resolved = SPACE_RUN.to_owned();
                }
                debug!(name, value = %resolved, "set variable");
                vars.set(name, resolved);
            }
            Ok(_) => {}
            Err(err) => {
                if matches!(&err, MenuError::MalformedDirective { line, .. } if is_set_line(line)) {
                    diagnostics.push(err);
                }
            }
        }
    }
    diagnostics
}

/// Only malformed `set` lines are this pass's business; a malformed `item`
/// in the same block is reported by the menu interpreter if at all.
fn is_set_line(line: &str) -> bool {
    line.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("set "))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
