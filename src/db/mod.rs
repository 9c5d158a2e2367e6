//! MongoDB client construction and collection names.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

pub const INVOICES: &str = "invoices";
pub const CUSTOMERS: &str = "customers";
pub const REVENUES: &str = "revenues";
pub const USERS: &str = "users";

/// Create a MongoDB client. The driver keeps its own connection pool, so one
/// client is built at startup and shared through `AppState`.
pub async fn create_client(uri: &str, max_pool_size: u32) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.max_pool_size = Some(max_pool_size);
    options.app_name = Some("finboard".to_string());
    Client::with_options(options)
}

/// Round-trip a `ping` command to confirm the server is reachable.
pub async fn ping(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
