//! Integration tests for the fixity integrity database

mod cli_commands;
mod config_integration;
mod ingest_workflow;
mod persistence_recovery;
