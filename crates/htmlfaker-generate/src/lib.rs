//! Randomized HTML fragment generation for htmlfaker.
//!
//! [`HtmlFaker`] resolves a [`Configuration`] from partial overrides and
//! composes headings, paragraphs, inline and block elements from a
//! [`RandomSource`] and a [`TextSource`].

pub mod block;
pub mod context;
pub mod document;
pub mod faker;
pub mod inline;
pub mod markup;
pub mod model;
pub mod random;
pub mod text;

pub use context::{ComposeContext, GenerationState, UnitKind};
pub use faker::{HtmlFaker, HtmlFakerBuilder, hash_seed};
pub use htmlfaker_core::{Configuration, Error, PartialConfiguration, Result};
pub use model::{DocumentReport, GeneratedDocument};
pub use random::RandomSource;
pub use text::{LoremTextSource, TextSource};
