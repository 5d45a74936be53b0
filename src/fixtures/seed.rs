use mongodb::results::InsertManyResult;
use serde::Serialize;
use tracing::debug;

use crate::connection::TestDb;
use crate::error::Result;

/// Insert `documents` into the named collection as one ordered batch
/// Returns the ids the store assigned, keyed by input position
/// Note: duplicate ids fail with the store's error; documents before the duplicate stay inserted
pub async fn fill_collection<T>(
    db: &TestDb,
    collection_name: &str,
    documents: impl IntoIterator<Item = T>,
) -> Result<InsertManyResult>
where
    T: Serialize + Send + Sync,
{
    let result = db
        .database()?
        .collection::<T>(collection_name)
        .insert_many(documents)
        .await?;

    debug!(
        collection = collection_name,
        inserted = result.inserted_ids.len(),
        "filled collection"
    );

    Ok(result)
}
