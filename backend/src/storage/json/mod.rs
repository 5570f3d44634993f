//! # JSON Storage Module
//!
//! File-backed implementation of the storage traits. The medication
//! collection is one JSON array written under a fixed key; each key maps to
//! a `{key}.json` file inside the data directory.

pub mod connection;
pub mod medication_repository;

pub use connection::JsonConnection;
pub use medication_repository::MedicationRepository;
