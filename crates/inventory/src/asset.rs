//! Behaviour shared by every tracked asset kind.
//!
//! Equipment and peripherals are separate record types with no links between
//! them. This module holds the small surface they share, which the filter
//! engine, the report projector and the store are written against.

use std::collections::BTreeSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use assetstock_core::{AssetId, DomainError, DomainResult, Entity};

use crate::report::ReportColumn;

/// Status every record carries; not user-editable.
pub const FIXED_STATUS: &str = "estoque";

/// Location every record carries; not user-editable.
pub const FIXED_LOCATION: &str = "em estoque – TI";

/// Site every peripheral is pinned to.
pub const FIXED_PERIPHERAL_SITE: &str = "estoque – periféricos";

/// Placeholder written in place of an unknown equipment serial number.
pub const SERIAL_PLACEHOLDER: &str = "N/A";

/// The two independent asset collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Equipment,
    Peripheral,
}

impl AssetClass {
    /// Key under which the whole collection is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            AssetClass::Equipment => "ti_inventory_equipments",
            AssetClass::Peripheral => "ti_inventory_peripherals",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Equipment => "equipment",
            AssetClass::Peripheral => "peripheral",
        }
    }
}

impl core::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked asset record (equipment or peripheral).
pub trait Asset:
    Entity<Id = AssetId> + Clone + PartialEq + core::fmt::Debug + Serialize + DeserializeOwned
{
    /// User-supplied fields for a record that does not exist yet.
    type Draft;

    /// Report columns this record can be projected onto.
    type Column: ReportColumn<Asset = Self>;

    const CLASS: AssetClass;

    /// Build a record from a draft under `id`, with fixed fields already forced.
    fn from_draft(id: AssetId, draft: Self::Draft) -> Self;

    /// Overwrite status/location (and the peripheral site) with their constants.
    fn enforce_fixed_fields(&mut self);

    /// Replace the identifier. Only the store calls this, and only for records
    /// that have not been stored yet.
    fn reassign_id(&mut self, id: AssetId);

    fn asset_tag(&self) -> &str;
    fn brand(&self) -> &str;
    fn model(&self) -> &str;
    fn serial_number(&self) -> &str;
    fn notes(&self) -> Option<&str>;
}

/// Check the required text fields (`assetTag`, `brand`, `model`) in that order.
pub fn validate_required<A: Asset>(asset: &A) -> DomainResult<()> {
    let required = [
        ("assetTag", asset.asset_tag()),
        ("brand", asset.brand()),
        ("model", asset.model()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::missing_field(field));
        }
    }
    Ok(())
}

/// Data-quality heuristic: the serial is empty, blank or the literal `N/A`.
///
/// The placeholder match is case-sensitive: `n/a` counts as a real serial.
pub fn is_serial_missing<A: Asset>(asset: &A) -> bool {
    let serial = asset.serial_number();
    serial.trim().is_empty() || serial == SERIAL_PLACEHOLDER
}

/// Distinct brands present in `items`, sorted.
pub fn available_brands<A: Asset>(items: &[A]) -> Vec<String> {
    items
        .iter()
        .map(|a| a.brand().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Declares a closed literal set whose serialized form is the exact external spelling.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal { $($variant:ident => $lit:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $lit)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// External spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $lit,)+
                }
            }

            /// Exact (case-sensitive) membership check against the external spellings.
            pub fn from_literal(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = assetstock_core::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_literal(s)
                    .ok_or_else(|| assetstock_core::DomainError::invalid_enum($field, s))
            }
        }
    };
}

pub(crate) use literal_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{Equipment, EquipmentKind, EquipmentSite, NewEquipment};
    use crate::peripheral::{Condition, NewPeripheral, Peripheral, PeripheralKind};

    fn equipment(tag: &str, brand: &str, model: &str, serial: &str) -> Equipment {
        Equipment::from_draft(
            AssetId::new(),
            NewEquipment {
                asset_tag: tag.to_string(),
                brand: brand.to_string(),
                model: model.to_string(),
                serial_number: serial.to_string(),
                kind: EquipmentKind::Notebook,
                site: EquipmentSite::PhysicalStock,
                notes: None,
            },
        )
    }

    fn peripheral(serial: &str) -> Peripheral {
        Peripheral::from_draft(
            AssetId::new(),
            NewPeripheral {
                asset_tag: "P-1".to_string(),
                brand: "Logitech".to_string(),
                model: "M90".to_string(),
                serial_number: serial.to_string(),
                kind: PeripheralKind::Mouse,
                condition: Condition::New,
                notes: None,
            },
        )
    }

    #[test]
    fn validate_required_accepts_complete_record() {
        assert!(validate_required(&equipment("100", "Dell", "X1", "")).is_ok());
    }

    #[test]
    fn validate_required_reports_first_blank_field() {
        let err = validate_required(&equipment("  ", "", "X1", "S")).unwrap_err();
        assert_eq!(err, DomainError::MissingField("assetTag"));

        let err = validate_required(&equipment("100", "Dell", "\t", "S")).unwrap_err();
        assert_eq!(err, DomainError::MissingField("model"));
    }

    #[test]
    fn serial_missing_covers_blank_and_placeholder() {
        assert!(is_serial_missing(&equipment("1", "b", "m", "")));
        assert!(is_serial_missing(&equipment("1", "b", "m", "   ")));
        assert!(is_serial_missing(&equipment("1", "b", "m", "N/A")));
        assert!(is_serial_missing(&peripheral("")));
        assert!(!is_serial_missing(&equipment("1", "b", "m", "n/a")));
        assert!(!is_serial_missing(&peripheral("SN-42")));
    }

    #[test]
    fn available_brands_are_distinct_and_sorted() {
        let items = vec![
            equipment("1", "Lenovo", "m", "s"),
            equipment("2", "Dell", "m", "s"),
            equipment("3", "Lenovo", "m", "s"),
        ];
        assert_eq!(available_brands(&items), vec!["Dell", "Lenovo"]);
    }

    #[test]
    fn storage_keys_are_distinct() {
        assert_ne!(
            AssetClass::Equipment.storage_key(),
            AssetClass::Peripheral.storage_key()
        );
    }
}
