use serde::{Deserialize, Serialize};

use assetstock_core::{AssetId, Entity};

use crate::asset::{Asset, AssetClass, FIXED_LOCATION, FIXED_STATUS, literal_enum};
use crate::report::EquipmentColumn;

literal_enum! {
    /// Equipment form factor.
    EquipmentKind, "equipment kind" {
        Notebook => "Notebook",
        Desktop => "Desktop",
        MiniPc => "Mini PC",
    }
}

literal_enum! {
    /// Where a piece of equipment physically is in the rollout pipeline.
    EquipmentSite, "equipment site" {
        PhysicalStock => "estoque físico",
        ReservedAreaStock => "estoque reservado área",
        RolloutCascade => "rollout – cascata",
        RolloutStock => "rollout – estoque",
    }
}

impl EquipmentSite {
    /// True for the two rollout sites.
    pub fn is_rollout(self) -> bool {
        self.as_str().starts_with("rollout")
    }
}

/// A computer tracked in IT stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: AssetId,
    pub asset_tag: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    pub kind: EquipmentKind,
    pub site: EquipmentSite,
    pub status: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields a caller supplies when registering new equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEquipment {
    pub asset_tag: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub kind: EquipmentKind,
    pub site: EquipmentSite,
    pub notes: Option<String>,
}

impl Entity for Equipment {
    type Id = AssetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Asset for Equipment {
    type Draft = NewEquipment;
    type Column = EquipmentColumn;

    const CLASS: AssetClass = AssetClass::Equipment;

    fn from_draft(id: AssetId, draft: NewEquipment) -> Self {
        let mut equipment = Self {
            id,
            asset_tag: draft.asset_tag,
            brand: draft.brand,
            model: draft.model,
            serial_number: draft.serial_number,
            kind: draft.kind,
            site: draft.site,
            status: String::new(),
            location: String::new(),
            notes: draft.notes,
        };
        equipment.enforce_fixed_fields();
        equipment
    }

    fn enforce_fixed_fields(&mut self) {
        if self.status != FIXED_STATUS {
            self.status = FIXED_STATUS.to_string();
        }
        if self.location != FIXED_LOCATION {
            self.location = FIXED_LOCATION.to_string();
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
