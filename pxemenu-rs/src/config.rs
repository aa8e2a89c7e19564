//! `pxemenurc` configuration file parser.
//!
//! The rc file uses a small line-oriented command syntax:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | seed a default variable |
//! | `/source <location>` | default script location |
//! | `/timeout <seconds>` | fetch timeout |
//! | `/color on\|off` | colour output |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Bad arguments on a recognised line produce a [`ConfigError`] for that
//! line; the rest of the file is still applied.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::cli::{parse_timeout, CliArgs};
use crate::fetch::DEFAULT_TIMEOUT;
use crate::var::VarStore;

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Effective settings: rc file values, optionally overridden from the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Defaults every load cycle starts from.
    pub vars: VarStore,
    /// Script location.
    pub source: Option<String>,
    pub timeout: Duration,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { vars: VarStore::new(), source: None, timeout: DEFAULT_TIMEOUT, color: true }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an rc file held in a string.
    ///
    /// Returns the config and a list of any errors on recognised lines.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));
            let args_str = args_str.trim();

            let result = match cmd {
                "set" => parse_set(&split_args(args_str), &mut config.vars),
                "source" => match split_args(args_str).as_slice() {
                    [location] => {
                        config.source = Some(location.clone());
                        Ok(())
                    }
                    _ => Err("/source: expected one location".to_owned()),
                },
                "timeout" => parse_timeout(args_str).map(|t| config.timeout = t),
                "color" | "colour" => parse_switch(args_str).map(|on| config.color = on),
                _ => Ok(()),
            };
            if let Err(message) = result {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse an rc file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Apply command-line overrides.  `-D` defines replace rc `/set` values
    /// of the same name.
    pub fn with_overrides(mut self, args: &CliArgs) -> Self {
        for (name, value) in &args.defines {
            self.vars.set(name.clone(), value.clone());
        }
        if let Some(source) = &args.source {
            self.source = Some(source.clone());
        }
        if let Some(timeout) = args.timeout {
            self.timeout = timeout;
        }
        if args.no_color {
            self.color = false;
        }
        self
    }
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() {
                    args.push(std::mem::take(&mut cur));
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        args.push(cur);
    }
    args
}

// ── Directive arguments ───────────────────────────────────────────────────────

/// Parse `/set <name>=<value>` or `/set <name> <value>`.
fn parse_set(tokens: &[String], vars: &mut VarStore) -> Result<(), String> {
    let Some(first) = tokens.first() else {
        return Err("/set: requires an argument".into());
    };

    let (name, value) = if let Some((name, value)) = first.split_once('=') {
        (name.to_owned(), value.to_owned())
    } else if tokens.len() >= 2 {
        (first.clone(), tokens[1..].join(" "))
    } else {
        return Err(format!("/set: missing value for '{first}'"));
    };

    if name.is_empty() {
        return Err("/set: variable name cannot be empty".into());
    }

    vars.set(name, value);
    Ok(())
}

fn parse_switch(arg: &str) -> Result<bool, String> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "yes" | "1" => Ok(true),
        "off" | "no" | "0" => Ok(false),
        other => Err(format!("/color: expected on or off, got '{other}'")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
