//! Dashboard and analytics figures computed over both collections.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::asset::is_serial_missing;
use crate::equipment::{Equipment, EquipmentKind, EquipmentSite};
use crate::peripheral::{Condition, Peripheral, PeripheralKind};

/// Physical stock below this many units is flagged as critical.
pub const CRITICAL_PHYSICAL_STOCK: usize = 5;

/// Physical vs rollout split for one equipment kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindBreakdown {
    /// Units on a non-rollout (stock) site.
    pub in_stock: usize,
    pub in_rollout: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_equipment: usize,
    pub total_peripherals: usize,

    pub equipment_by_kind: BTreeMap<EquipmentKind, usize>,
    pub equipment_by_site: BTreeMap<EquipmentSite, usize>,
    pub equipment_by_brand: BTreeMap<String, usize>,
    pub peripherals_by_kind: BTreeMap<PeripheralKind, usize>,
    pub peripherals_by_condition: BTreeMap<Condition, usize>,

    pub rollout_count: usize,
    pub physical_stock_count: usize,
    pub physical_stock_critical: bool,

    pub equipment_missing_serial: usize,
    pub peripherals_missing_serial: usize,
    /// Share of all assets with a usable serial, in percent (100 when empty).
    pub data_health_score: f64,
    /// Share of equipment on a rollout site, in percent (0 when empty).
    pub rollout_rate: f64,
    /// Peripherals per piece of equipment (0 when there is no equipment).
    pub peripheral_ratio: f64,

    /// One entry for every equipment kind, including kinds with no units.
    pub stock_breakdown: BTreeMap<EquipmentKind, KindBreakdown>,
}

fn tally<K: Ord>(keys: impl Iterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn percent(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}

impl InventorySummary {
    pub fn compute(equipment: &[Equipment], peripherals: &[Peripheral]) -> Self {
        let total_equipment = equipment.len();
        let total_peripherals = peripherals.len();

        let rollout_count = equipment.iter().filter(|e| e.site.is_rollout()).count();
        let physical_stock_count = equipment
            .iter()
            .filter(|e| e.site == EquipmentSite::PhysicalStock)
            .count();

        let equipment_missing_serial = equipment.iter().filter(|e| is_serial_missing(*e)).count();
        let peripherals_missing_serial =
            peripherals.iter().filter(|p| is_serial_missing(*p)).count();

        let total_assets = total_equipment + total_peripherals;
        let data_health_score = if total_assets == 0 {
            100.0
        } else {
            percent(
                total_assets - equipment_missing_serial - peripherals_missing_serial,
                total_assets,
            )
        };
        let rollout_rate = if total_equipment == 0 {
            0.0
        } else {
            percent(rollout_count, total_equipment)
        };
        let peripheral_ratio = if total_equipment == 0 {
            0.0
        } else {
            total_peripherals as f64 / total_equipment as f64
        };

        let mut stock_breakdown: BTreeMap<EquipmentKind, KindBreakdown> = EquipmentKind::ALL
            .iter()
            .map(|kind| (*kind, KindBreakdown::default()))
            .collect();
        for e in equipment {
            let entry = stock_breakdown.entry(e.kind).or_default();
            entry.total += 1;
            if e.site.is_rollout() {
                entry.in_rollout += 1;
            } else {
                entry.in_stock += 1;
            }
        }

        Self {
            total_equipment,
            total_peripherals,
            equipment_by_kind: tally(equipment.iter().map(|e| e.kind)),
            equipment_by_site: tally(equipment.iter().map(|e| e.site)),
            equipment_by_brand: tally(equipment.iter().map(|e| e.brand.clone())),
            peripherals_by_kind: tally(peripherals.iter().map(|p| p.kind)),
            peripherals_by_condition: tally(peripherals.iter().map(|p| p.condition)),
            rollout_count,
            physical_stock_count,
            physical_stock_critical: physical_stock_count < CRITICAL_PHYSICAL_STOCK,
            equipment_missing_serial,
            peripherals_missing_serial,
            data_health_score,
            rollout_rate,
            peripheral_ratio,
            stock_breakdown,
        }
    }

    pub fn total_missing_serial(&self) -> usize {
        self.equipment_missing_serial + self.peripherals_missing_serial
    }
}
