//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config;

/// Keeps the non-blocking writers flushing until dropped.
#[derive(Debug)]
pub struct LogGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Installs the global subscriber described by `conf`.
///
/// `crates_to_watch` get the configured console level, everything else logs
/// at `WARN`. `RUST_LOG` takes precedence over both when set.
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> LogGuard {
    let mut guards = Vec::new();

    let env_filter = match conf.console.filtering_directive.as_deref() {
        Some(directive) => EnvFilter::builder().parse_lossy(directive),
        None => EnvFilter::builder()
            .with_default_directive(conf.console.level.into_level().into())
            .from_env_lossy(),
    };
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = conf.console.level.into_level();
        let console_filter = crates_to_watch.into_iter().fold(
            filter::Targets::new().with_default(tracing::Level::WARN),
            |targets, name| targets.with_target(name.as_ref(), level),
        );

        match conf.console.log_format {
            config::LogFormat::Default => {
                let logging_layer = fmt::layer()
                    .with_span_events(fmt::format::FmtSpan::CLOSE)
                    .pretty()
                    .with_writer(console_writer)
                    .with_filter(console_filter);
                subscriber.with(logging_layer).try_init().ok();
            }
            config::LogFormat::Json => {
                let logging_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE)
                    .with_writer(console_writer)
                    .with_filter(console_filter);
                subscriber.with(logging_layer).try_init().ok();
            }
        }
    } else {
        subscriber.try_init().ok();
    }

    LogGuard {
        _log_guards: guards,
    }
}
