// Entrypoint for the CLI application.
// - Keeps `main` small: resolve the config, build the API client and hand
//   both to the demo flow.
// - Only setup errors make the process fail; API failures are reported on
//   stdout by the UI layer.

use anyhow::Context;
use geekspatrol_cli::{api::ApiClient, config::Config, sample, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout only carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::debug!(base_url = %config.base_url, "configuration resolved");
    let api = ApiClient::new(&config)?;

    let mut out = ui::Console::stdout();
    ui::run(&api, &sample::foldables_article(), &mut out).context("Failed to write to stdout")?;
    Ok(())
}
