#![allow(dead_code)]

use bson::oid::ObjectId;
use bson::{Document, doc};
use nwdaf_loader::{AMF_LOCATION_REPORT_COLLECTION, MemorySource, SMF_EVENTS_COLLECTION};

pub const UE_1: &str = "imsi-208930000000001";
pub const UE_2: &str = "imsi-208930000000002";
pub const UE_3: &str = "imsi-208930000000003";

pub fn location_report(supi: &str, tac: &str, nr_cell_id: &str) -> Document {
    doc! {
        "_id": ObjectId::new(),
        "supi": supi,
        "type": "LOCATION_REPORT",
        "location": {
            "nrLocation": {
                "tai": {
                    "plmnId": { "mcc": "208", "mnc": "93" },
                    "tac": tac,
                },
                "ncgi": {
                    "plmnId": { "mcc": "208", "mnc": "93" },
                    "nrCellId": nr_cell_id,
                },
            },
        },
    }
}

pub fn smf_event(supi: &str, event_type: &str, pdu_session_id: i32) -> Document {
    doc! {
        "_id": ObjectId::new(),
        "supi": supi,
        "eventType": event_type,
        "pduSeId": pdu_session_id,
        "dnn": "internet",
        "snssai": { "sst": 1, "sd": "010203" },
    }
}

pub fn amf_reports() -> Vec<Document> {
    vec![
        location_report(UE_1, "000001", "000000010"),
        location_report(UE_2, "000001", "000000020"),
        location_report(UE_1, "000002", "000000011"),
    ]
}

pub fn smf_events() -> Vec<Document> {
    vec![
        smf_event(UE_1, "PDU_SES_EST", 1),
        smf_event(UE_1, "PDU_SES_REL", 1),
        smf_event(UE_2, "PDU_SES_EST", 2),
        smf_event(UE_2, "UE_IP_CH", 2),
    ]
}

/// Both NWDAF collections seeded with the fixtures above.
pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_collection(AMF_LOCATION_REPORT_COLLECTION, amf_reports())
        .with_collection(SMF_EVENTS_COLLECTION, smf_events())
}
