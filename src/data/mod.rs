//! Data layer: item records, loading, and the ranking being edited.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → ItemList (records with an id)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ ranking   │  random draw → ordered snapshot, reordered by the user
//!   └──────────┘
//!        │
//!        ▼
//!   regression::scatter  (one Dataset per attribute)
//! ```

pub mod loader;
pub mod model;
pub mod ranking;
