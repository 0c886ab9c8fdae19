mod capsules_repository;
mod capsules_repository_impl;
mod dto;
mod entity;
mod error;
mod init_guard;

#[cfg(test)]
mod in_memory_capsules_repository;

pub use capsules_repository::*;
pub use capsules_repository_impl::*;
pub use dto::*;
pub use error::*;

#[cfg(test)]
pub use in_memory_capsules_repository::*;

#[cfg(test)]
pub mod test {
    use mongodb::{options::ClientOptions, Client, Database};
    use uuid::Uuid;

    ///
    /// Creates uniquely named database on the server from env.
    /// Returns None when no database is configured, so the calling test is skipped.
    ///
    pub async fn create_test_database() -> anyhow::Result<Option<Database>> {
        let _ = dotenvy::dotenv();
        let Ok(db_connection_string) = std::env::var("TIME_CAPSULE_DB_CONNECTION_STRING") else {
            println!("TIME_CAPSULE_DB_CONNECTION_STRING not set, skipping database test");
            return Ok(None);
        };
        let db_name = format!("test_{}", Uuid::new_v4());

        println!("creating test database: {db_name}");

        let db_client_options = ClientOptions::parse(&db_connection_string).await?;
        let db_client = Client::with_options(db_client_options)?;
        let db = db_client.database(&db_name);

        Ok(Some(db))
    }

    pub async fn destroy_test_database(database: Database) {
        let _ = database.drop().await;
        database.client().clone().shutdown().await;
    }
}
