//! Infrastructure layer: persistence, the inventory store, spreadsheet codecs,
//! import/export pipelines and configuration.

pub mod codec;
pub mod config;
pub mod persistence;
pub mod pipeline;
pub mod store;

mod integration_tests;

pub use codec::{CodecError, CsvCodec, JsonRowsCodec, SpreadsheetCodec};
pub use config::{InventoryConfig, bootstrap};
pub use persistence::{
    FilePersistenceStore, InMemoryPersistenceStore, PersistenceError, PersistenceStore,
};
pub use pipeline::{ImportReport, PipelineError, export_report, import_spreadsheet};
pub use store::{InventoryStore, StoreError, Stored};
