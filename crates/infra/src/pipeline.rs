//! Import and export glue between the codec, the inventory rules and the store.

use serde::Serialize;
use thiserror::Error;

use assetstock_inventory::{
    Criteria, ImportDiagnostics, ImportError, Importable, ReportColumn, filter, normalize, project,
};

use crate::codec::{CodecError, SpreadsheetCodec};
use crate::persistence::PersistenceStore;
use crate::store::{InventoryStore, StoreError, Stored};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a finished import appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub diagnostics: ImportDiagnostics,
}

/// Decode a sheet, normalize it into `A` records and append them in one batch.
///
/// Nothing is appended when decoding or the sheet-level checks fail.
pub fn import_spreadsheet<A, P, C>(
    store: &mut InventoryStore<P>,
    codec: &C,
    bytes: &[u8],
) -> Result<ImportReport, PipelineError>
where
    A: Stored + Importable,
    P: PersistenceStore,
    C: SpreadsheetCodec + ?Sized,
{
    let rows = codec.decode(bytes)?;
    let outcome = normalize::<A>(&rows).inspect_err(|err| {
        tracing::warn!(class = %A::CLASS, rows = rows.len(), error = %err, "import rejected");
    })?;

    let diagnostics = outcome.diagnostics;
    let imported = store.bulk_add(outcome.records)?;

    tracing::info!(
        class = %A::CLASS,
        imported,
        defaulted_asset_tag = diagnostics.defaulted_asset_tag,
        defaulted_brand = diagnostics.defaulted_brand,
        defaulted_model = diagnostics.defaulted_model,
        defaulted_serial = diagnostics.defaulted_serial,
        defaulted_kind = diagnostics.defaulted_kind,
        defaulted_site = diagnostics.defaulted_site,
        defaulted_condition = diagnostics.defaulted_condition,
        "import finished"
    );

    Ok(ImportReport {
        imported,
        diagnostics,
    })
}

/// Filter `items`, project the hits onto `selection` and encode the result.
///
/// Every matching row is exported; on-screen truncation is left to
/// [`assetstock_inventory::preview`].
pub fn export_report<Col, Cr, C>(
    items: &[Col::Asset],
    criteria: &Cr,
    selection: &[Col],
    codec: &C,
) -> Result<Vec<u8>, PipelineError>
where
    Col: ReportColumn,
    Cr: Criteria<Col::Asset> + ?Sized,
    C: SpreadsheetCodec + ?Sized,
{
    let hits = filter(items, criteria);
    let rows = project(hits, selection);
    let bytes = codec.encode(&rows)?;

    tracing::debug!(
        rows = rows.len(),
        columns = selection.len(),
        bytes = bytes.len(),
        "report encoded"
    );
    Ok(bytes)
}
