use bson::Document;

/// Optional restrictions for a fetch. Both default to "none".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    /// Field → expected value. `None` or an empty document matches everything.
    pub filter: Option<Document>,
    /// `field: 1` includes, `field: 0` excludes. `None` returns all fields.
    pub projection: Option<Document>,
}

impl FetchOptions {
    pub fn with_filter(mut self, filter: Document) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    /// The filter to send, with "absent" mapped to the empty document.
    pub fn filter_or_empty(&self) -> Document {
        self.filter.clone().unwrap_or_default()
    }
}
