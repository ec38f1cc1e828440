use once_cell::sync::OnceCell;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TABULA_LOG";

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a process-wide subscriber writing timestamped, leveled lines to stdout.
///
/// `level` is the default when `TABULA_LOG` is unset. Only the first call has any effect, and an
/// already installed global subscriber is left in place.
pub fn init_logging(level: LevelFilter) {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .with_env_var(LOG_ENV_VAR)
            .from_env_lossy();
        let installed = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_filter(filter),
            )
            .try_init();
        if let Err(error) = installed {
            tracing::debug!(%error, "global subscriber already installed");
        }
    });
}
