//! File-backed persistence adapters.

mod document;
mod json_snapshot_repository;

pub use json_snapshot_repository::JsonFileSnapshotRepository;
