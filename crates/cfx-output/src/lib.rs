//! Output side of an extraction run.
//!
//! Everything lives under one data directory:
//!
//! ```text
//! data/
//! ├── in/state.json                            previous run state
//! └── out/
//!     ├── state.json                           state for the next run
//!     └── tables/
//!         ├── confluence_pages.csv             output table
//!         └── confluence_pages.csv.manifest    table manifest
//! ```
//!
//! - [`DataDir`]: path layout
//! - [`TableWriter`]: CSV writer that only publishes the table once complete
//! - [`TableManifest`]: primary key and load mode for the table
//! - [`RunState`]: the `last_run` watermark

mod error;
mod layout;
mod manifest;
mod state;
mod table;

pub use error::OutputError;
pub use layout::{DataDir, PAGES_TABLE};
pub use manifest::TableManifest;
pub use state::RunState;
pub use table::TableWriter;
