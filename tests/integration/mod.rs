//! Integration tests for the confcell configuration store

mod cli_commands;
mod listeners;
mod save_roundtrip;
mod schema_integration;
