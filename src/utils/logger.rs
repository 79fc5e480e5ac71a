use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::{AppError, AppResult};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();
static LOGGER_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

const DEFAULT_LOG_DIRECTIVES: &str = "info,app::api=debug,app::fetch=debug";

/// Initializes the tracing subscriber once: console output always, plus a
/// daily-rolling file when `log_dir` is given (or `DEVPULSE_LOG_DIR` is
/// set). Safe to call repeatedly.
pub fn init_logging(log_dir: Option<&Path>) -> AppResult<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
                .map_err(|err| AppError::other(format!("invalid log directives: {err}")))?;

            let env_dir = std::env::var("DEVPULSE_LOG_DIR").ok();
            let dir = log_dir
                .map(|path| path.to_path_buf())
                .or_else(|| env_dir.map(Into::into));

            let registry = tracing_subscriber::registry().with(env_filter);

            match dir {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)?;
                    let file_appender = tracing_appender::rolling::daily(&dir, "devpulse.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    LOGGER_GUARD
                        .set(guard)
                        .map_err(|_| AppError::other("logger already initialized"))?;

                    registry
                        .with(
                            fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false)
                                .with_target(true)
                                .with_timer(UtcTime::rfc_3339()),
                        )
                        .with(
                            fmt::layer()
                                .with_target(false)
                                .with_timer(UtcTime::rfc_3339()),
                        )
                        .init();
                }
                None => {
                    registry
                        .with(
                            fmt::layer()
                                .with_target(false)
                                .with_timer(UtcTime::rfc_3339()),
                        )
                        .init();
                }
            }

            Ok(())
        })
        .map(|_| ())
}
