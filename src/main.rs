use anyhow::Result;
use clap::Parser;
use sensor_anomaly::cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr: stdout carries nothing on success
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sensor_anomaly=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
