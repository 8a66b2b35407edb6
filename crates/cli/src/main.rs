use anyhow::Context;
use bookshop_http::router::{merged_openapi, route_table};
use bookshop_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Command-line entrypoint for the bookshop service
#[derive(Debug, Parser)]
#[command(name = "bookshop", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the route table of every module
    Routes,
    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshop settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            bookshop_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.bind_address(),
                "bookshop serve starting"
            );
            bookshop_app::run(settings).await
        }
        Command::Routes => {
            let registry = bookshop_app::build_registry(&settings)?;
            for entry in route_table(&merged_openapi(&registry)) {
                println!("{:<7} {:<40} {}", entry.method, entry.path, entry.summary);
            }
            Ok(())
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
