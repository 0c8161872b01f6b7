//! Spreadsheet codec boundary.
//!
//! A codec turns an uploaded sheet into loosely-typed rows keyed by header
//! text, and turns projected report rows back into a file. Binary workbook
//! formats live behind this trait; the two codecs here cover JSON row arrays
//! and CSV.

use thiserror::Error;

use assetstock_inventory::{RawRow, ReportRow};
use serde_json::Value as JsonValue;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON sheet: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error while writing sheet: {0}")]
    Io(#[from] std::io::Error),
}

pub trait SpreadsheetCodec: Send + Sync {
    /// Parse a sheet into rows, in sheet order.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>, CodecError>;

    /// Write report rows, keeping each row's column order.
    fn encode(&self, rows: &[ReportRow]) -> Result<Vec<u8>, CodecError>;
}

/// A sheet as a JSON array of objects, one object per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRowsCodec;

impl SpreadsheetCodec for JsonRowsCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, rows: &[ReportRow]) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(rows)?)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated sheet with a header line.
///
/// Every header becomes a key on every row. Empty cells decode as `null`, so
/// they read as absent values while the header still counts as present.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spreadsheet tools in pt-BR locales export with `;`.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl SpreadsheetCodec for CsvCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>, CodecError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.to_string(), cell_value(cell)))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }

    fn encode(&self, rows: &[ReportRow]) -> Result<Vec<u8>, CodecError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if let Some(first) = rows.first() {
            writer.write_record(first.labels())?;
        }
        for row in rows {
            writer.write_record(row.cells().iter().map(|(_, value)| value.as_str()))?;
        }
        writer.into_inner().map_err(|err| CodecError::Io(err.into_error()))
    }
}

fn cell_value(cell: &str) -> JsonValue {
    if cell.is_empty() {
        JsonValue::Null
    } else {
        JsonValue::String(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetstock_core::AssetId;
    use assetstock_inventory::{
        Asset, Equipment, EquipmentColumn, EquipmentKind, EquipmentSite, NewEquipment, project,
    };

    fn sample_rows() -> Vec<ReportRow> {
        let e = Equipment::from_draft(
            AssetId::new(),
            NewEquipment {
                asset_tag: "4410".to_string(),
                brand: "Dell".to_string(),
                model: "Latitude 5420".to_string(),
                serial_number: "7XK2".to_string(),
                kind: EquipmentKind::Notebook,
                site: EquipmentSite::PhysicalStock,
                notes: Some("tela, riscada".to_string()),
            },
        );
        project(
            [&e],
            &[EquipmentColumn::Notes, EquipmentColumn::AssetTag, EquipmentColumn::Brand],
        )
    }

    #[test]
    fn json_decode_keeps_row_order_and_cell_types() {
        let rows = JsonRowsCodec
            .decode(br#"[{"RI": 10, "MARCA": "HP"}, {"RI": "11", "OBS": null}]"#)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["RI"], JsonValue::from(10));
        assert_eq!(rows[1]["OBS"], JsonValue::Null);
    }

    #[test]
    fn json_decode_rejects_non_tabular_input() {
        assert!(matches!(JsonRowsCodec.decode(b"{\"RI\": 1}"), Err(CodecError::Json(_))));
        assert!(JsonRowsCodec.decode(b"[1, 2]").is_err());
    }

    #[test]
    fn json_encode_keeps_column_order() {
        let bytes = JsonRowsCodec.encode(&sample_rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"[{"RI (Patrimônio)":"4410","Marca":"Dell","Observação":"tela, riscada"}]"#
        );
    }

    #[test]
    fn csv_decode_maps_headers_to_cells() {
        let input = "\u{feff}RI,MARCA,MODELO,N/S\n100,Dell,Latitude,\n101,HP,,X1\n";
        let rows = CsvCodec::new().decode(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["RI"], JsonValue::from("100"));
        assert_eq!(rows[0]["N/S"], JsonValue::Null);
        assert_eq!(rows[1]["MODELO"], JsonValue::Null);
        assert!(rows[1].contains_key("MODELO"));
    }

    #[test]
    fn csv_semicolon_delimiter() {
        let rows = CsvCodec::with_delimiter(b';')
            .decode("RI;MARCA\n7;Lenovo\n".as_bytes())
            .unwrap();
        assert_eq!(rows[0]["MARCA"], JsonValue::from("Lenovo"));
    }

    #[test]
    fn csv_encode_writes_header_then_rows() {
        let bytes = CsvCodec::new().encode(&sample_rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "RI (Patrimônio),Marca,Observação\n4410,Dell,\"tela, riscada\"\n"
        );
    }

    #[test]
    fn csv_encode_of_nothing_is_empty() {
        assert!(CsvCodec::new().encode(&[]).unwrap().is_empty());
    }
}
