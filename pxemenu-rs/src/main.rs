use std::io::{self, stderr};
use std::process::ExitCode;

use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use pxemenu::cli::{self, CliArgs, ConfigFile};
use pxemenu::config::Config;
use pxemenu::error::MenuError;
use pxemenu::fetch::{HttpFetcher, ScriptSource};
use pxemenu::load::LoadedMenu;
use pxemenu::render::Renderer;
use pxemenu::state::MenuState;

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pxemenu={level}")));
    registry().with(filter).with(fmt::layer().with_writer(stderr)).init();
}

/// Load the rc file selected by `-f`, or the first one found on the search
/// path.  A missing or unreadable file leaves the built-in defaults.
fn load_config(choice: &ConfigFile) -> Config {
    let path = match choice {
        ConfigFile::Skip => return Config::default(),
        ConfigFile::Explicit(path) => path.clone(),
        ConfigFile::Search => match cli::find_user_config() {
            Some(path) => path,
            None => return Config::default(),
        },
    };
    match Config::load_file(&path) {
        Ok((config, errors)) => {
            debug!(path = %path.display(), "rc file loaded");
            for err in errors {
                warn!(path = %path.display(), "{err}");
            }
            config
        }
        Err(e) => {
            eprintln!("pxemenu: warning: {}: {e}", path.display());
            Config::default()
        }
    }
}

fn render(args: &CliArgs, loaded: &LoadedMenu, color: bool) -> io::Result<ExitCode> {
    let mut out = Renderer::new(io::stdout().lock(), color);
    if args.labels {
        out.labels(loaded)?;
    } else if args.json {
        out.json(loaded)?;
    } else if let Some(key) = &args.select {
        match loaded.select(key) {
            Ok(selection) => out.selection(&selection)?,
            Err(MenuError::NotFound(_)) => {
                eprintln!("pxemenu: {key}: not found");
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => {
                eprintln!("pxemenu: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        out.menu(loaded)?;
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("pxemenu: {e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.debug);

    let config = load_config(&args.config).with_overrides(&args);
    let Some(location) = config.source.as_deref() else {
        eprintln!("pxemenu: no script source given");
        eprintln!("{}", cli::USAGE);
        return ExitCode::from(2);
    };
    let source = ScriptSource::parse(location);

    let fetcher = match HttpFetcher::new(config.timeout) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("pxemenu: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = MenuState::new(config.vars.clone());
    // A failed fetch is logged by reload; the empty menu is rendered.
    let _ = state.reload(&fetcher, &source).await;
    let loaded = state.snapshot();

    match render(&args, &loaded, config.color) {
        Ok(code) => code,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pxemenu: {e}");
            ExitCode::FAILURE
        }
    }
}
