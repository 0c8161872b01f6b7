use serde::{Deserialize, Serialize};

use assetstock_core::{AssetId, Entity};

use crate::asset::{
    Asset, AssetClass, FIXED_LOCATION, FIXED_PERIPHERAL_SITE, FIXED_STATUS, literal_enum,
};
use crate::report::PeripheralColumn;

literal_enum! {
    PeripheralKind, "peripheral kind" {
        Mouse => "Mouse",
        Keyboard => "Teclado",
        Headset => "Headset",
    }
}

literal_enum! {
    /// Physical condition of a peripheral.
    Condition, "peripheral condition" {
        New => "novo",
        Used => "usado",
    }
}

/// A mouse, keyboard or headset kept in the peripheral stock.
///
/// Peripherals never move through rollout, so `site` is a constant like
/// `status` and `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peripheral {
    pub id: AssetId,
    pub asset_tag: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    pub kind: PeripheralKind,
    pub condition: Condition,
    pub site: String,
    pub status: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPeripheral {
    pub asset_tag: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub kind: PeripheralKind,
    pub condition: Condition,
    pub notes: Option<String>,
}

impl Entity for Peripheral {
    type Id = AssetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Asset for Peripheral {
    type Draft = NewPeripheral;
    type Column = PeripheralColumn;

    const CLASS: AssetClass = AssetClass::Peripheral;

    fn from_draft(id: AssetId, draft: NewPeripheral) -> Self {
        let mut peripheral = Self {
            id,
            asset_tag: draft.asset_tag,
            brand: draft.brand,
            model: draft.model,
            serial_number: draft.serial_number,
            kind: draft.kind,
            condition: draft.condition,
            site: String::new(),
            status: String::new(),
            location: String::new(),
            notes: draft.notes,
        };
        peripheral.enforce_fixed_fields();
        peripheral
    }

    fn enforce_fixed_fields(&mut self) {
        for (field, value) in [
            (&mut self.site, FIXED_PERIPHERAL_SITE),
            (&mut self.status, FIXED_STATUS),
            (&mut self.location, FIXED_LOCATION),
        ] {
            if *field != value {
                *field = value.to_string();
            }
        }
    }

    fn reassign_id(&mut self, id: AssetId) {
        self.id = id;
    }

    fn asset_tag(&self) -> &str {
        &self.asset_tag
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn serial_number(&self) -> &str {
        &self.serial_number
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
