// Entrypoint: set up logging, read settings and hand over to the
// interactive flow. Backup failures are reported by the UI; only
// terminal/prompt errors bubble up here.

use cat_disk_backup::{ui::run_interactive, Settings};
use tracing_subscriber::{fmt, EnvFilter};

fn setup_logging() {
    // Quiet by default so log lines don't interleave with the prompts.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let settings = Settings::from_env();
    run_interactive(&settings)?;
    Ok(())
}
