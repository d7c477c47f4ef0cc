use bson::Document;

use crate::error::LoaderError;
use crate::options::FetchOptions;

/// Something that can answer a filtered, projected find over a named collection.
///
/// [`MongoSource`](crate::MongoSource) talks to a real server with a
/// connection scoped to each call; [`MemorySource`](crate::MemorySource)
/// serves fixture documents.
///
/// Every match is returned at once; there is no cursor or paging.
pub trait DocumentSource {
    fn find(&self, collection: &str, options: &FetchOptions)
    -> Result<Vec<Document>, LoaderError>;
}
