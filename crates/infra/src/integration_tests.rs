//! Integration tests for the full inventory flow.
//!
//! Tests: sheet → Codec → Normalizer → Store → Persistence → reload → Filter → Report
//!
//! Verifies:
//! - Imported and hand-created records survive a restart unchanged
//! - Fixed fields hold after every mutation path
//! - Exports see exactly the filtered records

#[cfg(test)]
mod tests {
    use serde_json::json;

    use assetstock_inventory::{
        Condition, Equipment, EquipmentColumn, EquipmentCriteria, EquipmentKind, EquipmentSite,
        FIXED_LOCATION, FIXED_PERIPHERAL_SITE, FIXED_STATUS, NewEquipment, Peripheral,
        PeripheralCriteria, PeripheralKind, all_columns, available_brands, filter, preview, project,
        selection_from_keys,
    };

    use crate::codec::{CsvCodec, JsonRowsCodec};
    use crate::persistence::FilePersistenceStore;
    use crate::pipeline::{export_report, import_spreadsheet};
    use crate::store::InventoryStore;

    fn open(dir: &std::path::Path) -> InventoryStore<FilePersistenceStore> {
        InventoryStore::open(FilePersistenceStore::open(dir).unwrap()).unwrap()
    }

    fn draft(tag: &str, site: EquipmentSite) -> NewEquipment {
        NewEquipment {
            asset_tag: tag.to_string(),
            brand: "Lenovo".to_string(),
            model: "ThinkPad T14".to_string(),
            serial_number: format!("PF{tag}"),
            kind: EquipmentKind::Notebook,
            site,
            notes: None,
        }
    }

    #[test]
    fn import_edit_reload_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());

        let sheet = serde_json::to_vec(&json!([
            {
                "RI": 900, "MARCA": "Dell", "MODELO": "Latitude 3420", "N/S": "H7Q",
                "TIPO": "Notebook", "SITE": "estoque físico"
            },
            {
                "RI": 901, "MARCA": "Dell", "MODELO": "OptiPlex 3080",
                "TIPO": "Desktop", "SITE": "rollout – estoque"
            },
            {"RI": 902, "MARCA": "HP", "MODELO": "", "TIPO": "Mini PC"},
        ]))
        .unwrap();
        let report =
            import_spreadsheet::<Equipment, _, _>(&mut store, &JsonRowsCodec, &sheet).unwrap();
        assert_eq!(report.imported, 3);
        assert_eq!(report.diagnostics.defaulted_model, 1);

        let manual: Equipment = store
            .create(draft("1200", EquipmentSite::ReservedAreaStock))
            .unwrap();
        let mut moved = store.equipment()[1].clone();
        moved.site = EquipmentSite::RolloutCascade;
        store.update(moved.clone()).unwrap();
        store.delete::<Equipment>(store.equipment()[0].id).unwrap();

        drop(store);
        let store = open(dir.path());

        let tags: Vec<_> = store.equipment().iter().map(|e| e.asset_tag.as_str()).collect();
        assert_eq!(tags, vec!["901", "902", "1200"]);
        assert_eq!(
            store.get::<Equipment>(moved.id).map(|e| e.site),
            Some(EquipmentSite::RolloutCascade)
        );
        assert_eq!(store.get::<Equipment>(manual.id), Some(&manual));
        assert!(store
            .equipment()
            .iter()
            .all(|e| e.status == FIXED_STATUS && e.location == FIXED_LOCATION));
        assert_eq!(store.equipment()[1].model, "GENERIC");
        assert_eq!(available_brands(store.equipment()), vec!["Dell", "HP", "Lenovo"]);

        let summary = store.summary();
        assert_eq!(summary.rollout_count, 1);
        assert_eq!(summary.equipment_missing_serial, 2);

        let selection =
            selection_from_keys::<EquipmentColumn>(&["brand", "assetTag", "site"]).unwrap();
        let out = export_report(
            store.equipment(),
            &EquipmentCriteria::new().brand("Dell"),
            &selection,
            &CsvCodec::new(),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "RI (Patrimônio),Marca,Site\n901,Dell,rollout – cascata\n"
        );
    }

    #[test]
    fn peripherals_keep_their_pinned_site_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());

        let csv = "RI;MARCA;MODELO;N/S;TIPO;ESTADO\n\
                   K1;Logitech;K120;;teclado;usado\n\
                   H1;JBL;Tune;X9;fone;novo\n";
        import_spreadsheet::<Peripheral, _, _>(
            &mut store,
            &CsvCodec::with_delimiter(b';'),
            csv.as_bytes(),
        )
        .unwrap();

        let mut edited = store.peripherals()[0].clone();
        edited.site = "almoxarifado".to_string();
        store.update(edited).unwrap();

        let store = open(dir.path());
        assert!(store.peripherals().iter().all(|p| p.site == FIXED_PERIPHERAL_SITE));

        let used = filter(
            store.peripherals(),
            &PeripheralCriteria::new().condition(Condition::Used).kind(PeripheralKind::Keyboard),
        );
        assert_eq!(used.len(), 1);
        assert_eq!(store.summary().peripherals_missing_serial, 1);
    }

    #[test]
    fn preview_truncates_but_export_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let batch: Vec<Equipment> = (0..75)
            .map(|i| {
                use assetstock_inventory::Asset;
                Equipment::from_draft(
                    assetstock_core::AssetId::new(),
                    draft(&i.to_string(), EquipmentSite::PhysicalStock),
                )
            })
            .collect();
        store.bulk_add(batch).unwrap();

        let rows = project(store.equipment(), &all_columns::<Equipment>());
        let shown = preview(&rows, assetstock_inventory::PREVIEW_LIMIT);
        assert_eq!(shown.rows.len(), 50);
        assert_eq!(shown.hidden, 25);

        let out = export_report(
            store.equipment(),
            &EquipmentCriteria::default(),
            &[EquipmentColumn::AssetTag],
            &JsonRowsCodec,
        )
        .unwrap();
        let exported: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(exported.len(), 75);
    }
}
