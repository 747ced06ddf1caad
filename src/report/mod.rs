// Report writers: terminal text and spreadsheet.

pub mod console;
pub mod row;
pub mod spreadsheet;

pub use row::{COLUMNS, render_row};
pub use spreadsheet::write_workbook;
