// xlsx output with fitted column widths
use crate::model::{CandidateRecord, ReportError};
use crate::report::row::{COLUMNS, render_row};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::Path;
use tracing::info;

const WIDTH_PADDING: usize = 2;

/// Writes one header row plus one row per record. The file is written even when
/// `records` is empty; a missing parent directory is created first.
pub fn write_workbook(path: &Path, records: &[CandidateRecord]) -> Result<(), ReportError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ReportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let rows: Vec<Vec<String>> = records.iter().map(render_row).collect();

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32 + 1, c as u16, value.as_str())?;
        }
    }
    for (c, width) in column_widths(&rows).into_iter().enumerate() {
        worksheet.set_column_width(c as u16, width as f64)?;
    }

    workbook.save(path)?;
    info!("Saved {} candidates to {}", rows.len(), path.display());
    Ok(())
}

/// Longest rendered value per column, header included, plus padding.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(c, name)| {
            let longest = rows
                .iter()
                .filter_map(|row| row.get(c))
                .map(|v| v.chars().count())
                .fold(name.chars().count(), usize::max);
            longest + WIDTH_PADDING
        })
        .collect()
}
