//! Spreadsheet workbook store
//!
//! The workbook is opened once with umya-spreadsheet and edited in place:
//! only cells written through `set_cell` change, every other cell keeps its
//! formula, style and number format. Saving writes into a temporary file next
//! to the original and renames it over the original, so a crash during a save
//! leaves the previous version intact.

use std::path::{Path, PathBuf};

use shared::CellValue;
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::core::selector::{MAX_COLUMN, MAX_ROW};
use crate::error::{EnricherError, EnricherResult};
use crate::traits::TabularStore;

/// Workbook extensions that can be edited without losing content.
///
/// Macro-enabled workbooks are refused: their VBA project is not guaranteed
/// to survive a rewrite.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xltx"];

/// Check that `path` names an existing workbook with a supported extension
pub fn check_workbook_path(path: &Path) -> EnricherResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Err(EnricherError::config(format!(
            "{} is not a supported workbook (expected .{})",
            path.display(),
            WORKBOOK_EXTENSIONS.join(" or .")
        )));
    }
    if !path.is_file() {
        return Err(EnricherError::config(format!("{} does not exist", path.display())));
    }
    Ok(())
}

/// Workbook kept open in memory and written back on `save`
pub struct WorkbookStore {
    path: PathBuf,
    book: Spreadsheet,
    active: String,
}

impl WorkbookStore {
    /// Open the workbook at `path`; the first sheet is active
    pub fn open(path: impl AsRef<Path>) -> EnricherResult<Self> {
        let path = path.as_ref();
        check_workbook_path(path)?;

        let book = umya_spreadsheet::reader::xlsx::read(path)?;
        let active = book
            .get_sheet_collection()
            .first()
            .map(|sheet| sheet.get_name().to_string())
            .ok_or_else(|| {
                EnricherError::store(format!("{} contains no worksheets", path.display()))
            })?;

        debug!(
            path = %path.display(),
            sheets = book.get_sheet_collection().len(),
            "Workbook loaded"
        );
        Ok(Self {
            path: path.to_path_buf(),
            book,
            active,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&self) -> EnricherResult<&Worksheet> {
        self.book
            .get_sheet_by_name(&self.active)
            .ok_or_else(|| EnricherError::store(format!("sheet '{}' disappeared", self.active)))
    }

    fn sheet_mut(&mut self) -> EnricherResult<&mut Worksheet> {
        let active = self.active.clone();
        self.book
            .get_sheet_by_name_mut(&active)
            .ok_or_else(|| EnricherError::store(format!("sheet '{active}' disappeared")))
    }
}

impl TabularStore for WorkbookStore {
    fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    fn select_sheet(&mut self, name: &str) -> EnricherResult<()> {
        if self.book.get_sheet_by_name(name).is_none() {
            return Err(EnricherError::config(format!("no sheet named '{name}'")));
        }
        self.active = name.to_string();
        Ok(())
    }

    fn active_sheet(&self) -> String {
        self.active.clone()
    }

    fn max_row(&self) -> u32 {
        self.sheet().map(|sheet| sheet.get_highest_row()).unwrap_or(0)
    }

    fn cell(&self, row: u32, column: u32) -> CellValue {
        let Ok(sheet) = self.sheet() else {
            return CellValue::Empty;
        };
        match sheet.get_cell((column, row)) {
            Some(cell) => cell_value(cell.get_data_type(), &cell.get_value()),
            None => CellValue::Empty,
        }
    }

    fn set_cell(&mut self, row: u32, column: u32, value: Option<String>) -> EnricherResult<()> {
        if row == 0 || row > MAX_ROW || column == 0 || column > MAX_COLUMN {
            return Err(EnricherError::store(format!(
                "cell ({row}, {column}) is outside the worksheet"
            )));
        }

        // Only the value changes; the cell's style stays as it was
        let cell = self.sheet_mut()?.get_cell_mut((column, row));
        cell.set_value_string(value.unwrap_or_default());
        Ok(())
    }

    fn save(&mut self) -> EnricherResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let suffix = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(".enricher-")
            .suffix(&suffix)
            .tempfile_in(&dir)?;
        umya_spreadsheet::writer::xlsx::write(&self.book, temp.path())?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        debug!(path = %self.path.display(), "Workbook saved");
        Ok(())
    }
}

/// Map a stored cell to a value; `data_type` is the OOXML cell type
fn cell_value(data_type: &str, raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Empty;
    }
    match data_type {
        "n" => raw
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
        "b" => CellValue::Bool(raw == "1" || raw.eq_ignore_ascii_case("true")),
        _ => CellValue::Text(raw.to_string()),
    }
}
