use std::sync::Arc;

use configotron::config::{load_config, print_schema};
use configotron::startup;
use configotron::utils::logger::init_logging;

/// Loads the configuration, initializes logging, and runs the server.
///
/// Passing `--schema` prints the JSON schema for the configuration file
/// and exits without starting the server.
#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = load_config();
    init_logging(&config.logging);

    if let Err(e) = startup::run(Arc::new(config)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
