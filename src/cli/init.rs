use tablegate::config::{Config, DatabaseConfig, EntityConfig, ServerConfig};
use tablegate::error::Result;

/// Run the init command to generate example configuration
pub fn run(output: Option<String>) -> Result<()> {
    let config = Config {
        server: ServerConfig {
            port: 4000,
            bind: "0.0.0.0".to_string(),
        },
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 3306,
            username: "user".to_string(),
            password: String::new(),
            database: "database".to_string(),
            max_connections: 10,
        },
        entity: vec![EntityConfig {
            name: "payments".to_string(),
            table: "payments".to_string(),
            allowed_filters: vec![],
            relations: vec![],
        }],
    };

    if let Some(output_path) = output {
        tablegate::config::save_config(&config, &output_path)?;
        tracing::info!("📝 Generated example configuration: {}", output_path);
        tracing::info!("🚀 Ready to serve! Run: tablegate serve --config {}", output_path);
    } else {
        let toml_string = toml::to_string_pretty(&config)?;
        println!("{}", toml_string);
        tracing::info!("💡 Tip: Add --output <file> to save to a file instead of stdout");
    }

    tracing::info!("");
    tracing::info!("💡 Next steps:");
    tracing::info!("   1. Point [database] at your MySQL server");
    tracing::info!("      (set TABLEGATE_DB_PASSWORD instead of storing the password)");
    tracing::info!("   2. Declare one [[entity]] per table to expose");
    tracing::info!("   3. Optionally restrict filtering with allowed_filters");

    Ok(())
}
