//! Table loading.
//!
//! Most callers should use [`load_table`] (from [`unified`]) which:
//!
//! - reads a tab-separated file with a header row
//! - checks the header for required columns
//! - maps every row through a caller transform, preserving file order
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The reader itself lives in [`tsv`].

pub mod observability;
pub mod tsv;
pub mod unified;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use tsv::{load_tsv_from_path, load_tsv_from_reader, tsv_reader_builder};
pub use unified::{LoadOptions, load_table};
