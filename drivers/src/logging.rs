//! Tracing subscriber setup for the driver binaries.

use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt as subscriber_fmt, prelude::*};

/// Install a subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level
/// (`0` warn, `1` info, `2+` debug). Safe to call more than once.
pub fn init(verbosity: u8) {
    let _ = Registry::default()
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level(verbosity).into())
                .from_env_lossy(),
        )
        .with(
            subscriber_fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn default_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), Level::WARN);
        assert_eq!(default_level(1), Level::INFO);
        assert_eq!(default_level(5), Level::DEBUG);
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(2);
    }
}
