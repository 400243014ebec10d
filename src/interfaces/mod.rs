//! Inbound/outbound adapters: the JSON catalog fixture loader and the CSV
//! request/fare streams used by the CLI.

pub mod csv;
pub mod json;
