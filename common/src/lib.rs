//! Chair Configurator Common Library
//!
//! CLIと将来のWeb(WASM)フロントエンドで共有されるカタログ処理

pub mod types;
pub mod error;
pub mod parser;
pub mod columns;
pub mod catalog;
pub mod index;
pub mod selection;
pub mod asset;
pub mod configurator;

pub use types::{CatalogEntry, CatalogOrigin};
pub use error::{Error, Result};
pub use parser::{parse_csv_line, CsvTable};
pub use catalog::{fallback_entries, ingest, Catalog, Classifier, DEFAULT_CHAIR_KEYWORDS};
pub use index::{CatalogIndex, FilterMode};
pub use selection::{SelectionEvent, SelectionMachine, SelectionState, SubscriptionId};
pub use asset::{AssetPath, AssetResolver};
pub use configurator::{AssetStatus, Configurator, Settings, Snapshot};
