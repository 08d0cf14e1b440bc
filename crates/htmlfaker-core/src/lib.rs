//! Core contracts for htmlfaker.
//!
//! This crate defines the element registry, weight tables, the generation
//! configuration and the error type shared by the generator and the CLI.

pub mod config;
pub mod elements;
pub mod error;
pub mod probability;
pub mod schema;
pub mod weights;

pub use config::{
    Configuration, DEFAULT_ASPECT_RATIO, HEADING_LEVEL_MAX, HEADING_LEVEL_MIN, ImageOptions,
    LeadOptions, PartialConfiguration, PartialImageOptions, PartialLeadOptions,
};
pub use elements::{BlockKind, ColumnType, InlineKind};
pub use error::{Error, Result};
pub use schema::config_json_schema;
pub use weights::WeightTable;
