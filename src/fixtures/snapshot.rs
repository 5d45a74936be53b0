use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use tracing::debug;

use crate::connection::TestDb;
use crate::document::{id_filter, without_id};
use crate::error::Result;

/// Take a snapshot of every document in the named collection
/// Order is whatever the store returns; `remove_ids` strips `_id` from each document
pub async fn collection_snapshot(
    db: &TestDb,
    collection_name: &str,
    remove_ids: bool,
) -> Result<Vec<Document>> {
    let documents: Vec<Document> = db
        .database()?
        .collection::<Document>(collection_name)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    debug!(
        collection = collection_name,
        documents = documents.len(),
        "took collection snapshot"
    );

    if remove_ids {
        return Ok(documents.into_iter().map(without_id).collect());
    }

    Ok(documents)
}

/// Take a snapshot of the document whose `_id` is `id`
/// Returns `None` when no document matches
pub async fn object_snapshot(
    db: &TestDb,
    collection_name: &str,
    id: impl Into<Bson>,
    remove_ids: bool,
) -> Result<Option<Document>> {
    let document = db
        .database()?
        .collection::<Document>(collection_name)
        .find_one(id_filter(id))
        .await?;

    debug!(
        collection = collection_name,
        found = document.is_some(),
        "took object snapshot"
    );

    Ok(document.map(|document| {
        if remove_ids {
            without_id(document)
        } else {
            document
        }
    }))
}
