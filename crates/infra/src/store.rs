//! Inventory store: owns both asset collections and persists them.
//!
//! Every successful mutation writes the *whole* affected collection to the
//! persistence store under that collection's key. Mutations are staged on a
//! copy and only committed in memory once the save succeeded, so a failed
//! save leaves the in-memory collection exactly as it was.

use thiserror::Error;

use assetstock_core::{AssetId, DomainError};
use assetstock_inventory::{
    Asset, AssetClass, Equipment, InventorySummary, Peripheral, validate_required,
};

use crate::persistence::{PersistenceError, PersistenceStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("no {class} with id {id}")]
    NotFound { class: AssetClass, id: AssetId },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value under `{key}` could not be read back: {source}")]
    Deserialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// An asset kind with a slot in [`InventoryStore`].
pub trait Stored: Asset {
    fn items<P>(store: &InventoryStore<P>) -> &Vec<Self>;
    fn items_mut<P>(store: &mut InventoryStore<P>) -> &mut Vec<Self>;
}

impl Stored for Equipment {
    fn items<P>(store: &InventoryStore<P>) -> &Vec<Self> {
        &store.equipment
    }

    fn items_mut<P>(store: &mut InventoryStore<P>) -> &mut Vec<Self> {
        &mut store.equipment
    }
}

impl Stored for Peripheral {
    fn items<P>(store: &InventoryStore<P>) -> &Vec<Self> {
        &store.peripherals
    }

    fn items_mut<P>(store: &mut InventoryStore<P>) -> &mut Vec<Self> {
        &mut store.peripherals
    }
}

/// The equipment and peripheral collections, in insertion order.
///
/// Callers hold the store and pass it by reference; there is no global instance.
#[derive(Debug)]
pub struct InventoryStore<P> {
    persistence: P,
    equipment: Vec<Equipment>,
    peripherals: Vec<Peripheral>,
}

impl<P: PersistenceStore> InventoryStore<P> {
    /// Load both collections. An absent key starts that collection empty.
    pub fn open(persistence: P) -> Result<Self, StoreError> {
        let equipment = load_collection::<Equipment>(&persistence)?;
        let peripherals = load_collection::<Peripheral>(&persistence)?;
        tracing::info!(
            equipment = equipment.len(),
            peripherals = peripherals.len(),
            "inventory loaded"
        );
        Ok(Self {
            persistence,
            equipment,
            peripherals,
        })
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Current collection of kind `A`, in insertion order.
    pub fn list<A: Stored>(&self) -> &[A] {
        A::items(self)
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn peripherals(&self) -> &[Peripheral] {
        &self.peripherals
    }

    pub fn get<A: Stored>(&self, id: AssetId) -> Option<&A> {
        A::items(self).iter().find(|a| *a.id() == id)
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::compute(&self.equipment, &self.peripherals)
    }

    /// Register a new record: validate required fields, assign a fresh id,
    /// force the fixed fields and append it.
    pub fn create<A: Stored>(&mut self, draft: A::Draft) -> Result<A, StoreError> {
        let asset = A::from_draft(AssetId::new(), draft);
        validate_required(&asset)?;

        let mut staged = A::items(self).clone();
        staged.push(asset.clone());
        self.commit(staged)?;

        tracing::debug!(class = %A::CLASS, id = %asset.id(), "asset created");
        Ok(asset)
    }

    /// Replace the record with `asset.id` in place.
    ///
    /// Required fields are not re-validated here; only the fixed fields are
    /// re-forced.
    pub fn update<A: Stored>(&mut self, mut asset: A) -> Result<A, StoreError> {
        let id = *asset.id();
        let position = A::items(self)
            .iter()
            .position(|a| *a.id() == id)
            .ok_or(StoreError::NotFound {
                class: A::CLASS,
                id,
            })?;
        asset.enforce_fixed_fields();

        let mut staged = A::items(self).clone();
        staged[position] = asset.clone();
        self.commit(staged)?;

        tracing::debug!(class = %A::CLASS, %id, "asset updated");
        Ok(asset)
    }

    /// Remove the record with `id`. Removing an unknown id succeeds and
    /// changes nothing.
    pub fn delete<A: Stored>(&mut self, id: AssetId) -> Result<(), StoreError> {
        let items = A::items(self);
        if !items.iter().any(|a| *a.id() == id) {
            tracing::debug!(class = %A::CLASS, %id, "delete of unknown id ignored");
            return Ok(());
        }

        let staged: Vec<A> = items.iter().filter(|a| *a.id() != id).cloned().collect();
        self.commit(staged)?;

        tracing::debug!(class = %A::CLASS, %id, "asset deleted");
        Ok(())
    }

    /// Append a batch in input order with a single save.
    ///
    /// Records are expected to come from the import normalizer. Fixed fields
    /// are re-forced, and a record whose id is already taken gets a fresh one.
    pub fn bulk_add<A: Stored>(&mut self, batch: Vec<A>) -> Result<usize, StoreError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let mut staged = A::items(self).clone();
        let mut taken: std::collections::HashSet<AssetId> =
            staged.iter().map(|a| *a.id()).collect();
        let added = batch.len();

        for mut asset in batch {
            asset.enforce_fixed_fields();
            if !taken.insert(*asset.id()) {
                let fresh = AssetId::new();
                tracing::warn!(
                    class = %A::CLASS,
                    old = %asset.id(),
                    new = %fresh,
                    "duplicate id re-keyed"
                );
                asset.reassign_id(fresh);
                taken.insert(fresh);
            }
            staged.push(asset);
        }
        self.commit(staged)?;

        tracing::info!(class = %A::CLASS, added, "bulk add committed");
        Ok(added)
    }

    /// Persist `staged` as the full collection of kind `A`, then adopt it.
    fn commit<A: Stored>(&mut self, staged: Vec<A>) -> Result<(), StoreError> {
        let key = A::CLASS.storage_key();
        let bytes =
            serde_json::to_vec(&staged).map_err(|source| StoreError::Serialize { key, source })?;

        if let Err(err) = self.persistence.save(key, &bytes) {
            tracing::warn!(key, error = %err, "save failed; in-memory collection unchanged");
            return Err(err.into());
        }

        tracing::debug!(key, size = staged.len(), bytes = bytes.len(), "collection saved");
        *A::items_mut(self) = staged;
        Ok(())
    }
}

fn load_collection<A: Stored>(persistence: &impl PersistenceStore) -> Result<Vec<A>, StoreError> {
    let key = A::CLASS.storage_key();
    match persistence.load(key)? {
        None => Ok(Vec::new()),
        Some(bytes) => {
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialize { key, source })
        }
    }
}
