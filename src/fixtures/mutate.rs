use mongodb::bson::{Bson, Document, doc};
use mongodb::results::UpdateResult;
use tracing::debug;

use crate::connection::TestDb;
use crate::document::id_filter;
use crate::error::Result;

/// Set each field of `update` on the document whose `_id` is `id`
/// Fields not named in `update` are left untouched
/// Note: an unknown id matches nothing and creates nothing; check `matched_count` to detect it
pub async fn update_object(
    db: &TestDb,
    collection_name: &str,
    id: impl Into<Bson>,
    update: Document,
) -> Result<UpdateResult> {
    let result = db
        .database()?
        .collection::<Document>(collection_name)
        .update_one(id_filter(id), doc! { "$set": update })
        .await?;

    debug!(
        collection = collection_name,
        matched = result.matched_count,
        modified = result.modified_count,
        "updated object"
    );

    Ok(result)
}
