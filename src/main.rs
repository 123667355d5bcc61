use anyhow::Result;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use money_manager::{App, Store};

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with the menu UI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let store = Store::open(Path::new("money.db"))?;
    store.initialize()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(store, stdin.lock(), stdout.lock());
    app.run()
}
