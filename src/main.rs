use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck::catalog::Catalog;
use taskdeck::codec;
use taskdeck::shell::Shell;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Menu-driven project and task tracking with flat-file persistence")]
struct Cli {
    /// Maximum number of projects the catalog can hold.
    #[arg(long, default_value_t = Catalog::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Data file to restore before entering the menu.
    #[arg(short, long)]
    load: Option<PathBuf>,
}

/// Initialize tracing on stderr so stdout stays clean for the menu.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "taskdeck=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut catalog = Catalog::with_capacity(cli.capacity);
    if let Some(path) = &cli.load {
        let loaded = codec::load(path, cli.capacity)?;
        for warning in &loaded.warnings {
            tracing::warn!(%warning, "skipped record in data file");
        }
        tracing::info!(
            file = %path.display(),
            projects = loaded.catalog.len(),
            "catalog restored"
        );
        catalog = loaded.catalog;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(catalog, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
