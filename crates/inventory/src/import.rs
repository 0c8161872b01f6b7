//! Spreadsheet import normalizer.
//!
//! Turns loosely-typed rows (as decoded from a spreadsheet) into complete
//! records of one asset kind. Rows are never rejected: missing or unrecognized
//! values fall back to defaults, and the defaults applied are counted in
//! [`ImportDiagnostics`] so callers can warn without blocking the import.

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use assetstock_core::AssetId;

use crate::asset::{Asset, SERIAL_PLACEHOLDER};
use crate::equipment::{Equipment, EquipmentKind, EquipmentSite, NewEquipment};
use crate::peripheral::{Condition, NewPeripheral, Peripheral, PeripheralKind};

/// One decoded spreadsheet row: column label to loosely-typed cell value.
pub type RawRow = serde_json::Map<String, JsonValue>;

/// Column labels of the import sheet.
pub mod columns {
    pub const RI: &str = "RI";
    pub const MARCA: &str = "MARCA";
    pub const MODELO: &str = "MODELO";
    pub const NS: &str = "N/S";
    pub const SITE: &str = "SITE";
    pub const ESTADO: &str = "ESTADO";
    pub const TIPO: &str = "TIPO";
    pub const OBS: &str = "OBS";

    /// Columns the first row must carry for the sheet to be accepted.
    pub const REQUIRED: [&str; 3] = [RI, MARCA, MODELO];
}

/// Asset tag written when `RI` is missing.
pub const MISSING_ASSET_TAG: &str = "NO_RI";

/// Brand/model written when `MARCA`/`MODELO` is missing.
pub const GENERIC: &str = "GENERIC";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("import contains no rows")]
    Empty,

    #[error("import header is missing required columns: {}", missing.join(", "))]
    Malformed { missing: Vec<&'static str> },
}

/// How many rows needed a default for each field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportDiagnostics {
    pub rows: usize,
    pub defaulted_asset_tag: usize,
    pub defaulted_brand: usize,
    pub defaulted_model: usize,
    pub defaulted_serial: usize,
    pub defaulted_kind: usize,
    pub defaulted_site: usize,
    pub defaulted_condition: usize,
}

impl ImportDiagnostics {
    /// Total number of defaults applied across all fields.
    pub fn total_defaults(&self) -> usize {
        self.defaulted_asset_tag
            + self.defaulted_brand
            + self.defaulted_model
            + self.defaulted_serial
            + self.defaulted_kind
            + self.defaulted_site
            + self.defaulted_condition
    }

    pub fn is_clean(&self) -> bool {
        self.total_defaults() == 0
    }
}

/// Normalized records, in input row order, plus what had to be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome<A> {
    pub records: Vec<A>,
    pub diagnostics: ImportDiagnostics,
}

/// An asset kind that can be built from an import row.
pub trait Importable: Asset {
    fn from_row(row: &RawRow, diagnostics: &mut ImportDiagnostics) -> Self;
}

/// Normalize `rows` into records of kind `A`.
///
/// Fails only on the sheet-level pre-checks: no rows at all, or a first row
/// lacking one of the `RI`/`MARCA`/`MODELO` keys. Empty values in those
/// columns are fine; only key absence counts.
pub fn normalize<A: Importable>(rows: &[RawRow]) -> Result<ImportOutcome<A>, ImportError> {
    let first = rows.first().ok_or(ImportError::Empty)?;

    let missing: Vec<&'static str> = columns::REQUIRED
        .into_iter()
        .filter(|column| !first.contains_key(*column))
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::Malformed { missing });
    }

    let mut diagnostics = ImportDiagnostics {
        rows: rows.len(),
        ..ImportDiagnostics::default()
    };
    let records = rows
        .iter()
        .map(|row| A::from_row(row, &mut diagnostics))
        .collect();

    Ok(ImportOutcome {
        records,
        diagnostics,
    })
}

/// Stringify a cell the way a spreadsheet shows it. `None` for absent/null.
fn cell_text(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

/// Whole numbers below this print in plain digits; larger ones keep exponent form.
const PLAIN_DIGITS_LIMIT: f64 = 1e21;

/// Spreadsheets store every number as a float; whole values print without `.0`.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f == 0.0 {
            return "0".to_string();
        }
        if f.fract() == 0.0 && f.abs() < PLAIN_DIGITS_LIMIT {
            return format!("{f:.0}");
        }
    }
    n.to_string()
}

/// Non-blank cell text, or `fallback` (counting the default).
fn text_or(row: &RawRow, column: &str, fallback: &str, counter: &mut usize) -> String {
    match cell_text(row, column) {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            *counter += 1;
            fallback.to_string()
        }
    }
}

fn lowered(row: &RawRow, column: &str) -> Option<String> {
    cell_text(row, column).map(|t| t.trim().to_lowercase())
}

/// Substring rules for equipment `TIPO`; `mini` wins over `desk`.
fn equipment_kind(tipo: Option<&str>) -> Option<EquipmentKind> {
    let tipo = tipo?;
    if tipo.contains("mini") {
        Some(EquipmentKind::MiniPc)
    } else if tipo.contains("desk") {
        Some(EquipmentKind::Desktop)
    } else if tipo.contains("notebook") {
        Some(EquipmentKind::Notebook)
    } else {
        None
    }
}

/// Substring rules for peripheral `TIPO`; headset/fone wins over teclado.
fn peripheral_kind(tipo: Option<&str>) -> Option<PeripheralKind> {
    let tipo = tipo?;
    if tipo.contains("headset") || tipo.contains("fone") {
        Some(PeripheralKind::Headset)
    } else if tipo.contains("teclado") {
        Some(PeripheralKind::Keyboard)
    } else if tipo.contains("mouse") {
        Some(PeripheralKind::Mouse)
    } else {
        None
    }
}

impl Importable for Equipment {
    fn from_row(row: &RawRow, diagnostics: &mut ImportDiagnostics) -> Self {
        let asset_tag = text_or(
            row,
            columns::RI,
            MISSING_ASSET_TAG,
            &mut diagnostics.defaulted_asset_tag,
        );
        let brand = text_or(row, columns::MARCA, GENERIC, &mut diagnostics.defaulted_brand);
        let model = text_or(row, columns::MODELO, GENERIC, &mut diagnostics.defaulted_model);

        let serial_number = match cell_text(row, columns::NS).filter(|s| !s.is_empty()) {
            Some(serial) => serial,
            None => {
                diagnostics.defaulted_serial += 1;
                SERIAL_PLACEHOLDER.to_string()
            }
        };

        let kind = equipment_kind(lowered(row, columns::TIPO).as_deref()).unwrap_or_else(|| {
            diagnostics.defaulted_kind += 1;
            EquipmentKind::Notebook
        });

        let site = lowered(row, columns::SITE)
            .and_then(|s| EquipmentSite::from_literal(&s))
            .unwrap_or_else(|| {
                diagnostics.defaulted_site += 1;
                EquipmentSite::PhysicalStock
            });

        Equipment::from_draft(
            AssetId::new(),
            NewEquipment {
                asset_tag,
                brand,
                model,
                serial_number,
                kind,
                site,
                notes: cell_text(row, columns::OBS),
            },
        )
    }
}

impl Importable for Peripheral {
    fn from_row(row: &RawRow, diagnostics: &mut ImportDiagnostics) -> Self {
        let asset_tag = text_or(
            row,
            columns::RI,
            MISSING_ASSET_TAG,
            &mut diagnostics.defaulted_asset_tag,
        );
        let brand = text_or(row, columns::MARCA, GENERIC, &mut diagnostics.defaulted_brand);
        let model = text_or(row, columns::MODELO, GENERIC, &mut diagnostics.defaulted_model);

        // Peripherals flag a missing serial by leaving it empty.
        let serial_number = cell_text(row, columns::NS).unwrap_or_default();
        if serial_number.is_empty() {
            diagnostics.defaulted_serial += 1;
        }

        let kind = peripheral_kind(lowered(row, columns::TIPO).as_deref()).unwrap_or_else(|| {
            diagnostics.defaulted_kind += 1;
            PeripheralKind::Mouse
        });

        let condition = lowered(row, columns::ESTADO)
            .and_then(|s| Condition::from_literal(&s))
            .unwrap_or_else(|| {
                diagnostics.defaulted_condition += 1;
                Condition::New
            });

        Peripheral::from_draft(
            AssetId::new(),
            NewPeripheral {
                asset_tag,
                brand,
                model,
                serial_number,
                kind,
                condition,
                notes: cell_text(row, columns::OBS),
            },
        )
    }
}
