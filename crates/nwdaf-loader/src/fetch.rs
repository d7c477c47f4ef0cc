use nwdaf_table::{ID_COLUMN, Table};
use tracing::info;

use crate::error::LoaderError;
use crate::mongo::MongoSource;
use crate::options::FetchOptions;
use crate::source::DocumentSource;

/// Run a find against `source` and flatten every match into a [`Table`].
///
/// Nested fields become `_`-joined columns and the `_id` column, when any row
/// has one, is converted to text. No match is an empty table, not an error.
pub fn fetch_table<S>(
    source: &S,
    collection: &str,
    options: &FetchOptions,
) -> Result<Table, LoaderError>
where
    S: DocumentSource + ?Sized,
{
    let docs = source.find(collection, options)?;
    let mut table = Table::from_documents(&docs);
    table.stringify_column(ID_COLUMN);

    info!(
        collection,
        rows = table.len(),
        columns = table.columns().len(),
        "fetched table"
    );
    Ok(table)
}

/// [`fetch_table`] over a connection to `endpoint` that lives only for this call.
pub fn fetch_mongo_table(
    endpoint: &str,
    database: &str,
    collection: &str,
    options: &FetchOptions,
) -> Result<Table, LoaderError> {
    fetch_table(&MongoSource::new(endpoint, database), collection, options)
}
