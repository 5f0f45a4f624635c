// Logging initialisation.
//
// Every event goes to **two** sinks:
//   - stdout             → what you see in a terminal or `docker logs`
//   - `./logs/diary.log` → kept on disk so request history survives restarts
//
// Verbosity comes from the `RUST_LOG` environment variable. Without it we
// log `info` for the service and hold the storage and HTTP crates at `warn`
// so a busy table doesn't drown out the request log.
//
// To see every diary operation:  `RUST_LOG=info,diary_service=debug`
// To enable sqlx queries:        `RUST_LOG=info,sqlx=debug`
// To trace Redis commands:       `RUST_LOG=info,redis=debug`

use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Applied only when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,sqlx=warn,redis=warn,hyper=warn,tower=warn,tower_http=info";

// Install the global tracing subscriber.
//
// Hands back the [`WorkerGuard`] of the non-blocking file writer. Keep it
// alive in `main` until the server has shut down: dropping it flushes and
// closes the writer, and anything logged afterwards never reaches the file.
pub fn init() -> non_blocking::WorkerGuard {
    // The directory (not the file) is the unit to mount as a volume when the
    // service runs in a container. `rolling::daily` would add rotation.
    let file_appender = tracing_appender::rolling::never("./logs", "diary.log");
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Terminal output keeps colours; the target shows which module logged.
    let stdout_layer = fmt::layer().with_target(true).with_ansi(true);

    // The file gets the same events without ANSI escapes so it stays greppable.
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
