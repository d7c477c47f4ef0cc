use bson::Document;
use nwdaf_table::Table;

use crate::error::LoaderError;
use crate::fetch::fetch_table;
use crate::options::FetchOptions;
use crate::source::DocumentSource;

pub const AMF_LOCATION_REPORT_COLLECTION: &str = "nwdaf.amf.locationReport";
pub const SMF_EVENTS_COLLECTION: &str = "nwdaf.smf.events";

const SUPI_FIELD: &str = "supi";
const EVENT_TYPE_FIELD: &str = "eventType";

/// Filter for AMF location reports. An absent or empty `supi` matches all.
pub fn amf_location_report_filter(supi: Option<&str>) -> Document {
    let mut filter = Document::new();
    insert_supplied(&mut filter, SUPI_FIELD, supi);
    filter
}

/// Filter for SMF events. Absent or empty values are left out.
pub fn smf_event_filter(supi: Option<&str>, event_type: Option<&str>) -> Document {
    let mut filter = Document::new();
    insert_supplied(&mut filter, SUPI_FIELD, supi);
    insert_supplied(&mut filter, EVENT_TYPE_FIELD, event_type);
    filter
}

// Empty strings count as not supplied.
fn insert_supplied(filter: &mut Document, field: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        filter.insert(field, value);
    }
}

pub fn load_amf_location_reports<S>(source: &S, supi: Option<&str>) -> Result<Table, LoaderError>
where
    S: DocumentSource + ?Sized,
{
    let options = FetchOptions::default().with_filter(amf_location_report_filter(supi));
    fetch_table(source, AMF_LOCATION_REPORT_COLLECTION, &options)
}

pub fn load_smf_events<S>(
    source: &S,
    supi: Option<&str>,
    event_type: Option<&str>,
) -> Result<Table, LoaderError>
where
    S: DocumentSource + ?Sized,
{
    let options = FetchOptions::default().with_filter(smf_event_filter(supi, event_type));
    fetch_table(source, SMF_EVENTS_COLLECTION, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn amf_filter() {
        assert_eq!(amf_location_report_filter(None), doc! {});
        assert_eq!(amf_location_report_filter(Some("")), doc! {});
        assert_eq!(
            amf_location_report_filter(Some("imsi-208930000000001")),
            doc! { "supi": "imsi-208930000000001" }
        );
    }

    #[test]
    fn smf_filter_includes_only_supplied_keys() {
        assert_eq!(smf_event_filter(None, None), doc! {});
        assert_eq!(
            smf_event_filter(None, Some("PDU_SES_EST")),
            doc! { "eventType": "PDU_SES_EST" }
        );
        assert_eq!(
            smf_event_filter(Some("imsi-1"), Some("")),
            doc! { "supi": "imsi-1" }
        );
        assert_eq!(
            smf_event_filter(Some("imsi-1"), Some("PDU_SES_REL")),
            doc! { "supi": "imsi-1", "eventType": "PDU_SES_REL" }
        );
    }
}
