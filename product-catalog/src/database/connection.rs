use mongodb::{Client, Database, bson::doc, options::ClientOptions};

use crate::{config::DatabaseConfig, error::Result};

pub const PRODUCTS: &str = "products";
pub const CATEGORIES: &str = "categories";

/// Opens a handle without contacting the server.
pub async fn open(config: &DatabaseConfig) -> Result<Database> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;

    Ok(client.database(&config.name))
}

/// Opens a handle and waits for the server to answer a ping.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let db = open(config).await?;
    check_health(&db).await?;

    tracing::info!("Connected to MongoDB database {}", config.name);

    Ok(db)
}

pub async fn check_health(db: &Database) -> Result<()> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
