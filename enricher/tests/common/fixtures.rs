//! Test fixtures and data for enricher tests

#![allow(dead_code)]

use registry::LookupResponse;
use serde_json::json;
use shared::CellValue;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const SHEET: &'static str = "Реестр";
    pub const SOURCE_COLUMN: u32 = 1;
    pub const TARGET_COLUMN: u32 = 2;

    pub const INN_1: &'static str = "111";
    pub const INN_2: &'static str = "222";
    pub const INN_3: &'static str = "333";

    pub const PRIVATE_OWNERSHIP: &'static str = "16";
    pub const MUNICIPAL_OWNERSHIP: &'static str = "14";

    /// Registry answer holding one organization with `code`
    pub fn response_with_code(code: &str) -> LookupResponse {
        LookupResponse::new(json!([{
            "inn": "7701234567",
            "shortName": "ООО \"РОМАШКА\"",
            "okfs": {"code": code, "name": "Частная собственность"}
        }]))
    }

    /// Registry answer for an unknown identifier
    pub fn empty_response() -> LookupResponse {
        LookupResponse::new(json!([]))
    }

    /// Header row plus three data rows:
    /// row 2 "111" / blank, row 3 "222" / "5", row 4 blank / blank
    pub fn partially_filled_sheet() -> Vec<(u32, u32, CellValue)> {
        vec![
            (1, 1, CellValue::from("ИНН")),
            (1, 2, CellValue::from("ОКФС")),
            (2, 1, CellValue::from(Self::INN_1)),
            (3, 1, CellValue::from(Self::INN_2)),
            (3, 2, CellValue::from("5")),
            (4, 3, CellValue::from("note")),
        ]
    }

    /// Header row plus rows 2..=4 with identifiers and blank targets
    pub fn unfilled_sheet() -> Vec<(u32, u32, CellValue)> {
        vec![
            (1, 1, CellValue::from("ИНН")),
            (1, 2, CellValue::from("ОКФС")),
            (2, 1, CellValue::from(Self::INN_1)),
            (3, 1, CellValue::from(Self::INN_2)),
            (4, 1, CellValue::from(Self::INN_3)),
        ]
    }
}
