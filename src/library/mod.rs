//! Local content library.
//!
//! The library keeps a copy of the gallery pool on disk so the gallery can
//! be browsed without the hosted backend.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.progall/
//! ├── config.yaml       # optional, see `config`
//! ├── catalog.json      # { "version": 1, "items": [ContentItem, ...] }
//! └── catalog.lock      # held while catalog.json is rewritten
//! ```

pub mod catalog;

pub use catalog::Catalog;
