use anyhow::Context;
use clap::{Parser, Subcommand};

use corkboard_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "corkboard-cli", about = "corkboard service tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the merged OpenAPI document to stdout
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let settings =
                Settings::load().with_context(|| "failed to load corkboard settings")?;
            corkboard_telemetry::init(&settings.telemetry);
            corkboard_app::serve(settings).await
        }
        Command::Openapi => {
            let registry = corkboard_app::build_registry();
            let spec = corkboard_http::router::merged_openapi(&registry);
            println!("{}", serde_json::to_string_pretty(&spec)?);
            Ok(())
        }
    }
}
