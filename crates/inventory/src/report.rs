//! Report projection: filtered records to flat, labelled rows ready for export.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use assetstock_core::{DomainError, DomainResult};

use crate::asset::{Asset, AssetClass};
use crate::equipment::Equipment;
use crate::peripheral::Peripheral;

/// Rows shown on screen before the rest is left to the export.
pub const PREVIEW_LIMIT: usize = 50;

/// A projectable field of one asset kind.
pub trait ReportColumn: Copy + Eq + core::fmt::Debug + 'static {
    type Asset;

    /// Every column, in canonical report order.
    const ALL: &'static [Self];

    /// Field key callers select columns by (e.g. `assetTag`).
    fn key(self) -> &'static str;

    /// Human-readable header written to the report.
    fn label(self) -> &'static str;

    fn value(self, asset: &Self::Asset) -> String;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EquipmentColumn {
    AssetTag,
    Kind,
    Brand,
    Model,
    SerialNumber,
    Site,
    Status,
    Notes,
}

impl ReportColumn for EquipmentColumn {
    type Asset = Equipment;

    const ALL: &'static [Self] = &[
        EquipmentColumn::AssetTag,
        EquipmentColumn::Kind,
        EquipmentColumn::Brand,
        EquipmentColumn::Model,
        EquipmentColumn::SerialNumber,
        EquipmentColumn::Site,
        EquipmentColumn::Status,
        EquipmentColumn::Notes,
    ];

    fn key(self) -> &'static str {
        match self {
            EquipmentColumn::AssetTag => "assetTag",
            EquipmentColumn::Kind => "kind",
            EquipmentColumn::Brand => "brand",
            EquipmentColumn::Model => "model",
            EquipmentColumn::SerialNumber => "serialNumber",
            EquipmentColumn::Site => "site",
            EquipmentColumn::Status => "status",
            EquipmentColumn::Notes => "notes",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EquipmentColumn::AssetTag => "RI (Patrimônio)",
            EquipmentColumn::Kind => "Tipo",
            EquipmentColumn::Brand => "Marca",
            EquipmentColumn::Model => "Modelo",
            EquipmentColumn::SerialNumber => "N/S",
            EquipmentColumn::Site => "Site",
            EquipmentColumn::Status => "Status",
            EquipmentColumn::Notes => "Observação",
        }
    }

    fn value(self, e: &Equipment) -> String {
        match self {
            EquipmentColumn::AssetTag => e.asset_tag.clone(),
            EquipmentColumn::Kind => e.kind.as_str().to_string(),
            EquipmentColumn::Brand => e.brand.clone(),
            EquipmentColumn::Model => e.model.clone(),
            EquipmentColumn::SerialNumber => e.serial_number.clone(),
            EquipmentColumn::Site => e.site.as_str().to_string(),
            EquipmentColumn::Status => e.status.clone(),
            EquipmentColumn::Notes => e.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PeripheralColumn {
    AssetTag,
    Kind,
    Brand,
    Model,
    Condition,
    SerialNumber,
    Site,
    Notes,
}

impl ReportColumn for PeripheralColumn {
    type Asset = Peripheral;

    const ALL: &'static [Self] = &[
        PeripheralColumn::AssetTag,
        PeripheralColumn::Kind,
        PeripheralColumn::Brand,
        PeripheralColumn::Model,
        PeripheralColumn::Condition,
        PeripheralColumn::SerialNumber,
        PeripheralColumn::Site,
        PeripheralColumn::Notes,
    ];

    fn key(self) -> &'static str {
        match self {
            PeripheralColumn::AssetTag => "assetTag",
            PeripheralColumn::Kind => "kind",
            PeripheralColumn::Brand => "brand",
            PeripheralColumn::Model => "model",
            PeripheralColumn::Condition => "condition",
            PeripheralColumn::SerialNumber => "serialNumber",
            PeripheralColumn::Site => "site",
            PeripheralColumn::Notes => "notes",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PeripheralColumn::AssetTag => "RI (Patrimônio)",
            PeripheralColumn::Kind => "Tipo",
            PeripheralColumn::Brand => "Marca",
            PeripheralColumn::Model => "Modelo",
            PeripheralColumn::Condition => "Estado",
            PeripheralColumn::SerialNumber => "N/S",
            PeripheralColumn::Site => "Site",
            PeripheralColumn::Notes => "Observação",
        }
    }

    fn value(self, p: &Peripheral) -> String {
        match self {
            PeripheralColumn::AssetTag => p.asset_tag.clone(),
            PeripheralColumn::Kind => p.kind.as_str().to_string(),
            PeripheralColumn::Brand => p.brand.clone(),
            PeripheralColumn::Model => p.model.clone(),
            PeripheralColumn::Condition => p.condition.as_str().to_string(),
            PeripheralColumn::SerialNumber => p.serial_number.clone(),
            PeripheralColumn::Site => p.site.clone(),
            PeripheralColumn::Notes => p.notes.clone().unwrap_or_default(),
        }
    }
}

/// Resolve external column keys; unknown keys are rejected.
pub fn selection_from_keys<C: ReportColumn>(keys: &[&str]) -> DomainResult<Vec<C>> {
    keys.iter()
        .map(|key| C::from_key(key).ok_or_else(|| DomainError::invalid_enum("report column", *key)))
        .collect()
}

/// One exported row: label/value pairs in canonical column order.
///
/// Serializes as a map, keeping that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    cells: Vec<(&'static str, String)>,
}

impl ReportRow {
    pub fn cells(&self) -> &[(&'static str, String)] {
        &self.cells
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(label, _)| *label)
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (label, value) in &self.cells {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Project `items` onto the selected columns.
///
/// One row per item, in item order. Cells follow the canonical column order
/// of `C::ALL`, whatever order `selection` lists them in.
pub fn project<'a, C, I>(items: I, selection: &[C]) -> Vec<ReportRow>
where
    C: ReportColumn,
    C::Asset: 'a,
    I: IntoIterator<Item = &'a C::Asset>,
{
    let columns: Vec<C> = C::ALL
        .iter()
        .copied()
        .filter(|c| selection.contains(c))
        .collect();

    items
        .into_iter()
        .map(|item| ReportRow {
            cells: columns.iter().map(|c| (c.label(), c.value(item))).collect(),
        })
        .collect()
}

/// The on-screen slice of a report and how many rows it leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPreview<'a> {
    pub rows: &'a [ReportRow],
    pub hidden: usize,
}

pub fn preview(rows: &[ReportRow], limit: usize) -> ReportPreview<'_> {
    let shown = rows.len().min(limit);
    ReportPreview {
        rows: &rows[..shown],
        hidden: rows.len() - shown,
    }
}

/// File name for an exported report, e.g. `Relatorio_equipment_2024-03-01.xlsx`.
pub fn report_file_name(class: AssetClass, date: NaiveDate) -> String {
    format!("Relatorio_{}_{}.xlsx", class.as_str(), date.format("%Y-%m-%d"))
}

/// Default selection: every column of the asset kind.
pub fn all_columns<A: Asset>() -> Vec<A::Column> {
    <A::Column as ReportColumn>::ALL.to_vec()
}
