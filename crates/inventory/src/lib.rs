//! Inventory domain module.
//!
//! This crate contains the IT asset inventory rules: the equipment and
//! peripheral records, the filter engine, the spreadsheet import normalizer,
//! the report projector and the dashboard summary. Everything here is pure
//! domain logic (no IO, no storage); fresh identifiers are the only
//! non-deterministic input.

pub mod asset;
pub mod equipment;
pub mod filter;
pub mod import;
pub mod peripheral;
pub mod report;
pub mod summary;

pub use asset::{
    Asset, AssetClass, FIXED_LOCATION, FIXED_PERIPHERAL_SITE, FIXED_STATUS, SERIAL_PLACEHOLDER,
    available_brands, is_serial_missing, validate_required,
};
pub use equipment::{Equipment, EquipmentKind, EquipmentSite, NewEquipment};
pub use filter::{Criteria, EquipmentCriteria, PeripheralCriteria, TextQuery, filter};
pub use import::{ImportDiagnostics, ImportError, ImportOutcome, Importable, RawRow, normalize};
pub use peripheral::{Condition, NewPeripheral, Peripheral, PeripheralKind};
pub use report::{
    EquipmentColumn, PREVIEW_LIMIT, PeripheralColumn, ReportColumn, ReportPreview, ReportRow,
    all_columns, preview, project, report_file_name, selection_from_keys,
};
pub use summary::{CRITICAL_PHYSICAL_STOCK, InventorySummary, KindBreakdown};
