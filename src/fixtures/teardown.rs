use futures::future::try_join_all;
use mongodb::bson::Document;
use tracing::debug;

use crate::connection::TestDb;
use crate::error::Result;

/// Drop every collection but keep the database
/// Namespaces under `system.` belong to the store and are skipped
pub async fn remove_collections(db: &TestDb) -> Result<()> {
    let database = db.database()?;
    let names = database.list_collection_names().await?;

    let drops = names
        .iter()
        .filter(|name| !name.starts_with("system."))
        .map(|name| async move { database.collection::<Document>(name).drop().await });
    let dropped = try_join_all(drops).await?.len();

    debug!(database = %database.name(), dropped, "removed collections");

    Ok(())
}

/// Drop the whole test database
pub async fn flush_database(db: &TestDb) -> Result<()> {
    let database = db.database()?;
    database.drop().await?;

    debug!(database = %database.name(), "flushed database");

    Ok(())
}
