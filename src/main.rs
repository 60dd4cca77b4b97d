mod command;
mod config;
mod error;

use config::CliConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "glance_patch=info,glance_image_patch=info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::parse();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    command::run(&config, stdin.lock(), stdout.lock())?;
    Ok(())
}
