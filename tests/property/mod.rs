//! Property-based tests for ingestion and reconciliation

mod ingest;
mod reconcile;
mod strategies;
