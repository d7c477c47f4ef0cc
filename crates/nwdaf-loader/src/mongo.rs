use bson::Document;
use mongodb::sync::Client;
use tracing::debug;

use crate::error::LoaderError;
use crate::options::FetchOptions;
use crate::settings::Settings;
use crate::source::DocumentSource;

/// A MongoDB database reached through a connection string.
///
/// Holds no connection between calls. Each [`find`](DocumentSource::find)
/// opens a client, drains the cursor into memory, and drops the client
/// before returning, on the error path too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSource {
    endpoint: String,
    database: String,
}

impl MongoSource {
    pub fn new(endpoint: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            database: database.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.mongodb_url, &settings.database)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn connect(&self) -> Result<Client, LoaderError> {
        Client::with_uri_str(&self.endpoint)
            .map_err(|e| LoaderError::Connection(format!("{}: {e}", self.endpoint)))
    }
}

impl DocumentSource for MongoSource {
    fn find(
        &self,
        collection: &str,
        options: &FetchOptions,
    ) -> Result<Vec<Document>, LoaderError> {
        let client = self.connect()?;
        let coll = client
            .database(&self.database)
            .collection::<Document>(collection);

        debug!(
            database = %self.database,
            collection,
            filter = ?options.filter,
            projection = ?options.projection,
            "find"
        );

        let mut find = coll.find(options.filter_or_empty());
        if let Some(projection) = &options.projection {
            find = find.projection(projection.clone());
        }
        let cursor = find.run()?;
        let docs = cursor.collect::<Result<Vec<_>, _>>()?;

        debug!(collection, matched = docs.len(), "find complete");
        Ok(docs)
    }
}
