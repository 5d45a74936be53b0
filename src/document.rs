use mongodb::bson::{Bson, Document};

/// Name of the identity field the store assigns on insertion
pub const ID_FIELD: &str = "_id";

/// Filter matching the single document whose identity is `id`
pub fn id_filter(id: impl Into<Bson>) -> Document {
    let mut filter = Document::new();
    filter.insert(ID_FIELD, id);
    filter
}

/// Return the document with `field` omitted
/// Remaining fields keep their original order
pub fn without_field(mut document: Document, field: &str) -> Document {
    document.remove(field);
    document
}

/// Return the document with its identity field omitted
pub fn without_id(document: Document) -> Document {
    without_field(document, ID_FIELD)
}
