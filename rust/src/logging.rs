//! Diagnostics subscriber: `tracing` events on stderr, filtered by `TESTLIB_LOG`.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings;

/// Install the stderr diagnostics subscriber.
///
/// Safe to call repeatedly; a subscriber installed elsewhere (for example
/// by a Rust test driver) wins and this becomes a no-op.
pub fn init() {
    let filter = EnvFilter::try_new(&settings().log_filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    report_config_problems();
}

static INIT: Once = Once::new();
static CONFIG_WARNED: Once = Once::new();

/// Settings are parsed before any subscriber exists, so their complaints are
/// replayed here.
fn report_config_problems() {
    CONFIG_WARNED.call_once(|| {
        if let Some(e) = &settings().report_error {
            tracing::warn!(error = %e, "falling back to text reports");
        }
    });
}

/// [`init`] at most once per process. Used by the C entry points.
pub fn init_once() {
    INIT.call_once(init);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_once();
        init_once();
        init();
        tracing::debug!("still alive");
    }
}
