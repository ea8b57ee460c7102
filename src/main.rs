use clap::{Parser, Subcommand};
use tablegate::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "tablegate")]
#[command(version = "0.1.0")]
#[command(about = "Turn MySQL tables into GraphQL APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate example configuration
    Init {
        /// Output config file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Start the GraphQL gateway
    Serve {
        /// Config file path
        #[arg(long, default_value = "tablegate.toml")]
        config: String,

        /// Server port (overrides the configured port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compile a GraphQL request to SQL and print it without executing
    Sql {
        /// Config file path
        #[arg(long, default_value = "tablegate.toml")]
        config: String,

        /// GraphQL request text, or '-' to read it from stdin
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            cli::init::run(output)?;
        }
        Commands::Serve { config, port } => {
            cli::serve::run(config, port).await?;
        }
        Commands::Sql { config, query } => {
            cli::sql::run(config, query).await?;
        }
    }

    Ok(())
}
