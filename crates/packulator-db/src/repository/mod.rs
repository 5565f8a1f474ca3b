//! # Repository Module
//!
//! Database repository implementations for Packulator.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.catalogs().get_by_hash("415a075d1196b695")                 │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                     │
//! │  ├── register(&self, sizes)                                            │
//! │  ├── get_by_id(&self, id) / get_by_hash(&self, hash)                   │
//! │  ├── list(&self) / profiles(&self, hash)                               │
//! │  └── soft_delete(&self, id)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Catalog registration, lookup and deletion

pub mod catalog;
