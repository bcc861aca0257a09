//! CSV dataset reading.
//!
//! Spreadsheet exports vary by locale: comma or semicolon delimited,
//! sometimes with a UTF-8 byte-order mark. The delimiter is picked from
//! the header line; cells are trimmed. Column meaning is left to the core.

use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::debug;

use cortina_core::RawTable;

use crate::error::{CatalogError, CatalogResult};

/// Reads a CSV file into a [`RawTable`].
pub fn read_table(path: &Path) -> CatalogResult<RawTable> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_from_str(&contents, path)
}

/// Parses CSV text. `origin` is only used in error messages.
pub fn read_table_from_str(contents: &str, origin: &Path) -> CatalogResult<RawTable> {
    let contents = contents.trim_start_matches('\u{feff}');
    let delimiter = detect_delimiter(contents);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(contents.as_bytes());

    let csv_error = |source: csv::Error| CatalogError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        path = %origin.display(),
        delimiter = %(delimiter as char),
        columns = headers.len(),
        rows = rows.len(),
        "Read CSV dataset"
    );
    Ok(RawTable::new(headers, rows))
}

/// Semicolon when the header line has more semicolons than commas.
fn detect_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or("");
    let commas = header.matches(',').count();
    let semicolons = header.matches(';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_comma_separated() {
        let csv = "Design,Type,Multiplier,LaborUnitPrice\nOndas,\"Velo, Blackout\",2,12000\n";
        let table = read_table_from_str(csv, Path::new("designs.csv")).unwrap();
        assert_eq!(table.headers(), &["Design", "Type", "Multiplier", "LaborUnitPrice"]);
        assert_eq!(table.rows()[0][1], "Velo, Blackout");
    }

    #[test]
    fn test_read_semicolon_with_bom() {
        let csv = "\u{feff}Diseño;Tipo;Multiplicador;PVP M.O.\n Ondas ; Velo ;2;12000\n";
        let table = read_table_from_str(csv, Path::new("designs.csv")).unwrap();
        assert_eq!(table.headers()[0], "Diseño");
        assert_eq!(table.rows()[0], vec!["Ondas", "Velo", "2", "12000"]);
    }

    #[test]
    fn test_blank_records_are_skipped() {
        let csv = "Supply,Unit\nRiel,MT\n,\nOjaletes,UND\n";
        let table = read_table_from_str(csv, Path::new("supplies.csv")).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_short_rows_are_kept() {
        let csv = "A,B,C\n1,2\n";
        let table = read_table_from_str(csv, Path::new("t.csv")).unwrap();
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_read_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "FabricType,Reference,Color,PricePerMeter").unwrap();
        writeln!(file, "Lino,L-100,Arena,28000").unwrap();

        let table = read_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::FileRead { .. }));
    }
}
