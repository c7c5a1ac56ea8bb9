// SPDX-License-Identifier: MPL-2.0
//! Headless demo: shows a sequence of alerts on a logging host.
//!
//! ```text
//! status-alert [--mode MODE] [--position POS] [--pickable BOOL]
//!              [--count N] [--interval-ms MS] [--config PATH]
//! ```
//!
//! Set `RUST_LOG=status_alert=debug` to follow the lifecycle.

use status_alert::config::{self, Config};
use status_alert::runloop::TokioRunLoop;
use status_alert::{
    Content, Environment, ImageHandle, LoggingHost, PresentationMode, Presenter, ShowOptions,
    VerticalPosition,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: status-alert [OPTIONS]

Options:
  --mode MODE         only-one | dismiss-current | display-all
  --position POS      top | center | bottom (default: center)
  --pickable BOOL     whether a press dismisses alerts (default: true)
  --count N           number of alerts to show (default: 3)
  --interval-ms MS    delay between show requests (default: 700)
  --config PATH       settings file (default: user config directory)
  -h, --help          print this help";

struct Args {
    mode: Option<PresentationMode>,
    position: VerticalPosition,
    pickable: bool,
    count: usize,
    interval: Duration,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Option<Self>, pico_args::Error> {
        let mut args = pico_args::Arguments::from_env();
        if args.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let parsed = Self {
            mode: args.opt_value_from_str("--mode")?,
            position: args
                .opt_value_from_str("--position")?
                .unwrap_or_default(),
            pickable: args.opt_value_from_str("--pickable")?.unwrap_or(true),
            count: args.opt_value_from_str("--count")?.unwrap_or(3),
            interval: Duration::from_millis(
                args.opt_value_from_str("--interval-ms")?.unwrap_or(700),
            ),
            config: args.opt_value_from_str("--config")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unexpected arguments: {rest:?}"),
            });
        }
        Ok(Some(parsed))
    }
}

/// Alerts as they appear in a few well-known apps.
fn presets() -> Vec<Content> {
    let loved = ImageHandle::new("loved-icon");
    let success = ImageHandle::new("success-icon");
    vec![
        Content::new()
            .with_image(loved.clone())
            .with_title("Loved")
            .with_message("We’ll recommend more like this in For You."),
        Content::new()
            .with_image(success.clone())
            .with_title("Subscribed"),
        Content::new()
            .with_image(loved)
            .with_title("Loved")
            .with_message("We’ll show more stories about this in For You."),
        Content::new()
            .with_title("StatusAlert")
            .with_message("With title and message"),
        Content::new().with_image(success),
        Content::new().with_message("StatusAlert with message"),
    ]
}

fn load_config(path: Option<&PathBuf>) -> status_alert::Result<Config> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

fn run(args: Args) -> status_alert::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    tracing::info!(mode = %config.mode, title = config.mode.title(), "starting demo");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async move {
        let host = Rc::new(LoggingHost::new("console"));
        let run_loop = Rc::new(TokioRunLoop::default());
        let frame = run_loop.frame_interval();
        let env = Environment::on_run_loop(host.clone(), run_loop);
        let presenter = Presenter::with_config(env, &config);

        for content in presets().into_iter().cycle().take(args.count) {
            let alert = presenter
                .alert(content)
                .pickable(args.pickable)
                .show(ShowOptions::at(args.position));
            if !alert.is_presenting() {
                tracing::info!(alert = %alert.id(), "show request had no effect");
            }
            tokio::time::sleep(args.interval).await;
        }

        let style = presenter.default_style();
        let settle = style.display_duration + style.fade_duration + Duration::from_millis(500);
        let deadline = tokio::time::Instant::now() + settle;
        while !host.attached().is_empty() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(frame).await;
        }
        tracing::info!(remaining = host.attached().len(), "demo finished");
    });
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match Args::parse() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}
