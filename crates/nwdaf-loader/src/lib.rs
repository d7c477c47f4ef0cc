mod error;
mod fetch;
mod loaders;
mod memory;
mod mongo;
mod options;
mod settings;
mod source;

pub use error::LoaderError;
pub use fetch::{fetch_mongo_table, fetch_table};
pub use loaders::{
    AMF_LOCATION_REPORT_COLLECTION, SMF_EVENTS_COLLECTION, amf_location_report_filter,
    load_amf_location_reports, load_smf_events, smf_event_filter,
};
pub use memory::MemorySource;
pub use mongo::MongoSource;
pub use options::FetchOptions;
pub use settings::Settings;
pub use source::DocumentSource;
