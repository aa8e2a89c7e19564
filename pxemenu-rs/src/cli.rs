//! Command-line argument parsing.
//!
//! Usage:
//!   pxemenu [-f[<file>]] [-D<name>=<value>]... [-t<secs>] [-s<key>] [-jlndh] [<source>]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;

pub const USAGE: &str =
    "Usage: pxemenu [-f[<file>]] [-D<name>=<value>]... [-t<secs>] [-s<key>] [-jlndh] [<source>]";

/// Environment variable naming an rc file to use instead of the search path.
pub const RC_ENV: &str = "PXEMENURC";
const RC_NAME: &str = "pxemenurc";
const DOT_RC_NAME: &str = ".pxemenurc";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Which rc file to read.
    pub config: ConfigFile,
    /// Variable defaults given with `-D<name>=<value>`, in order.
    pub defines: Vec<(String, String)>,
    /// Fetch timeout override (`-t<secs>`).
    pub timeout: Option<Duration>,
    /// Key to select instead of showing the menu (`-s<key>`).
    pub select: Option<String>,
    /// Print the menu as JSON (`-j`).
    pub json: bool,
    /// List label names (`-l`).
    pub labels: bool,
    /// Disable colour output (`-n`).
    pub no_color: bool,
    /// Debug logging (`-d`).
    pub debug: bool,
    /// Print usage and exit (`-h`).
    pub help: bool,
    /// Script location: URL, file path or `-` for stdin.
    pub source: Option<String>,
}

/// How to choose the rc file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum ConfigFile {
    /// Search `$PXEMENURC`, the user config dir, `~/.pxemenurc`, `./.pxemenurc`.
    #[default]
    Search,
    /// `-f` with no file argument: skip the rc file.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Value for an option letter: rest of the current arg, or the next arg.
fn option_value(
    flag: char,
    chars: &[char],
    j: &mut usize,
    argv: &[String],
    i: &mut usize,
) -> Result<String, String> {
    if *j + 1 < chars.len() {
        let value: String = chars[*j + 1..].iter().collect();
        *j = chars.len();
        Ok(value)
    } else if *i + 1 < argv.len() {
        *i += 1;
        Ok(argv[*i].clone())
    } else {
        Err(format!("-{flag} requires an argument"))
    }
}

fn parse_define(def: &str) -> Result<(String, String), String> {
    match def.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("invalid define '{def}', expected <name>=<value>")),
    }
}

/// Parse a positive number of seconds.
pub fn parse_timeout(secs: &str) -> Result<Duration, String> {
    match secs.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
        _ => Err(format!("invalid timeout '{secs}', expected a positive number of seconds")),
    }
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        // Non-flag argument; a lone `-` means stdin.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => args.debug = true,
                'j' => args.json = true,
                'l' => args.labels = true,
                'n' => args.no_color = true,
                'h' => args.help = true,

                // -f[<file>]: value must be attached
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                'D' => {
                    let def = option_value('D', &chars, &mut j, argv, &mut i)?;
                    args.defines.push(parse_define(&def)?);
                }
                't' => {
                    let secs = option_value('t', &chars, &mut j, argv, &mut i)?;
                    args.timeout = Some(parse_timeout(&secs)?);
                }
                's' => {
                    args.select = Some(option_value('s', &chars, &mut j, argv, &mut i)?);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    match positional.len() {
        0 => {}
        1 => args.source = positional.pop(),
        n => return Err(format!("too many arguments ({n})")),
    }

    Ok(args)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Candidate rc file locations in search order.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(explicit) = env::var_os(RC_ENV).filter(|v| !v.is_empty()) {
        paths.push(PathBuf::from(explicit));
    }
    if let Some(dirs) = BaseDirs::new() {
        paths.push(dirs.config_dir().join("pxemenu").join(RC_NAME));
        paths.push(dirs.home_dir().join(DOT_RC_NAME));
    }
    paths.push(PathBuf::from(".").join(DOT_RC_NAME));
    paths
}

/// Search for the user rc file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    config_candidates().into_iter().find(|p| p.is_file())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
