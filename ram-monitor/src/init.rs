//! Log subscriber for the `ram-monitor` binary
//!
//! Library code only emits `tracing` events. Whoever embeds the monitor decides
//! where they go; the CLI routes them here.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the process-wide subscriber.
///
/// Logs go to stderr so stdout stays clean for `check`/`status` output. The
/// `-v` count sets the floor for `crate_name` (none: warn, `-v`: info, `-vv`:
/// debug, more: trace) on top of whatever `RUST_LOG` asks for. `LOG_FORMAT=json`
/// emits one JSON object per event instead of plain lines.
///
/// Fails if the directive does not parse or a subscriber is already installed.
pub fn init_tracing(crate_name: &str, verbose: u8) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level_for_verbosity(verbose));
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
