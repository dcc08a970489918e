//! Registry response fixtures for testing

#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{Value, json};

/// A single organization with an ownership classification
pub fn single_organization(inn: &str, code: &str) -> Value {
    json!([{
        "id": "5b1d2f04",
        "inn": inn,
        "ogrn": "1026103159840",
        "okpo": "00123456",
        "shortName": "ООО \"РОМАШКА\"",
        "okfs": {"code": code, "name": "Частная собственность"},
        "okopf": {"code": "12300", "name": "Общества с ограниченной ответственностью"}
    }])
}

/// Several records for one identifier, only later ones classified
pub fn mixed_organizations() -> Value {
    json!([
        {"inn": "7701234567", "okpo": "1", "okfs": null},
        {"inn": "7701234567", "okpo": "2", "okfs": {"code": null, "name": null}},
        {"inn": "7701234567", "okpo": "3", "okfs": {"code": "13", "name": "Муниципальная собственность"}},
        {"inn": "7701234567", "okpo": "4", "okfs": {"code": "16", "name": "Частная собственность"}}
    ])
}

/// The registry answers unknown identifiers with an empty list
pub fn no_organizations() -> Value {
    json!([])
}

/// Error object returned instead of a list
pub fn error_object() -> Value {
    json!({"error": "internal", "message": "temporarily unavailable"})
}
