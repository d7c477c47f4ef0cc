mod flatten;
mod table;
mod text;

pub use flatten::{SEPARATOR, flatten_document, split_column, unflatten_row};
pub use table::{ID_COLUMN, Table};
pub use text::{MISSING, MISSING_TEXT, bson_to_text};
