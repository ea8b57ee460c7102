use tablegate::db::Database;
use tablegate::error::Result;
use tablegate::schema::Gateway;

use std::io::Read;

/// Run the sql command: compile one GraphQL request to its SELECT statement
/// and print it without executing. The configured database is still needed
/// for table introspection.
pub async fn run(config_path: String, query: String) -> Result<()> {
    let config = tablegate::config::load_config(&config_path)?;

    let query_text = if query == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        query
    };

    let db = Database::connect(&config.database).await?;
    let gateway = Gateway::new(db, config.entity);

    let statement = gateway.compile(&query_text).await?;
    println!("{}", statement);

    Ok(())
}
