//! Placeholder substitution.
//!
//! Rewrites the placeholders that appear in titles, item labels, `set`
//! values and label blocks:
//!
//! | Sequence          | Meaning                                              |
//! |-------------------|------------------------------------------------------|
//! | `${name}`         | Value of variable `name`                             |
//! | `${name:type}`    | Same; the type tag is accepted and ignored           |
//! | `${space}`        | Always four spaces, whatever the store holds         |
//! | `${unknown}`      | Left verbatim when `unknown` is not in the store     |
//!
//! Substitution is a single left-to-right pass: a substituted value that
//! itself contains a placeholder is emitted as-is, never re-expanded.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::var::VarStore;

/// What `${space}` and the `20:20` hex literal expand to.
pub const SPACE_RUN: &str = "    ";

/// Reserved variable name that always expands to [`SPACE_RUN`].
pub const SPACE_VAR: &str = "space";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::[^}]+)?\}").expect("placeholder pattern is valid")
    })
}

/// Expand every placeholder in `text` against `vars`.
pub fn substitute(text: &str, vars: &VarStore) -> String {
    substitute_cow(text, vars).into_owned()
}

/// Like [`substitute`], but borrows `text` when it holds no placeholder.
pub fn substitute_cow<'t>(text: &'t str, vars: &VarStore) -> Cow<'t, str> {
    placeholder_re().replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        if name == SPACE_VAR {
            return SPACE_RUN.to_owned();
        }
        match vars.get(name) {
            Some(value) => value.to_owned(),
            None => caps[0].to_owned(),
        }
    })
}

/// Returns `true` if `text` contains at least one placeholder.
pub fn has_placeholder(text: &str) -> bool {
    placeholder_re().is_match(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
