//! Azure Blob Storage adapter.
//!
//! Talks to the blob REST API directly: `List Blobs` for enumeration and
//! `Set Blob Tier` for transitions. Requests carry the shared access
//! signature from the connection string; no request signing is done here.

mod client;
mod connection_string;
mod listing;

pub use client::AzureBlobTierStore;
pub use connection_string::ConnectionSettings;
