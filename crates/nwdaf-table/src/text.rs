use bson::Bson;

/// Rendered in place of a cell the row does not have.
pub const MISSING: &str = "NaN";

/// Text stored when a missing cell is stringified.
pub const MISSING_TEXT: &str = "nan";

/// Render a BSON value as plain text, in the same form a data-frame
/// `astype(str)` gives.
///
/// Strings are returned as-is (no quotes) and ObjectIds as their hex form.
/// Doubles always carry a fraction (`7.0`), booleans are `True`/`False` and
/// null is `None`. Anything structured falls back to relaxed extended JSON.
pub fn bson_to_text(value: &Bson) -> String {
    match value {
        Bson::String(s) | Bson::Symbol(s) => s.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) => double_to_text(*n),
        Bson::Boolean(true) => "True".to_string(),
        Bson::Boolean(false) => "False".to_string(),
        Bson::Null => "None".to_string(),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

fn double_to_text(n: f64) -> String {
    if n.is_nan() {
        MISSING_TEXT.to_string()
    } else if n == f64::INFINITY {
        "inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        // Debug keeps the trailing `.0` on whole numbers.
        format!("{n:?}")
    }
}
