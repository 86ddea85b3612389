use crate::{banner, format};
use anyhow::Error;
use config::ExportConfig;
use csv::StringRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Every row of a CSV file, header included
pub fn read_rows(path: &Path) -> Result<Vec<StringRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    Ok(rows)
}

/// CSV files directly inside `dir`, sorted by name
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "csv") {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Echo the header and the first rows of a single file
pub fn preview_file<W: Write>(
    path: &Path,
    rows: usize,
    width: usize,
    out: &mut W,
) -> Result<(), Error> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    writeln!(out, "\n--- {} ---", name)?;

    let records = read_rows(path)?;
    for record in records.iter().take(rows + 1) {
        let cells: Vec<_> = record
            .iter()
            .map(|cell| format::truncate(cell, width))
            .collect();
        writeln!(out, "  {}", cells.join(" | "))?;
    }

    if records.len() > rows + 1 {
        writeln!(out, "  ... ({} total rows)", records.len() - 1)?;
    }

    Ok(())
}

/// Echo every CSV file found in `dir`
pub fn preview_dir<W: Write>(dir: &Path, config: &ExportConfig, out: &mut W) -> Result<(), Error> {
    banner(out, '=', "CSV FILES CREATED")?;

    for path in csv_files(dir)? {
        preview_file(&path, config.preview_rows, config.preview_cell_width, out)?;
    }

    writeln!(out, "\n{}", "=".repeat(crate::RULE_WIDTH))?;
    Ok(())
}
