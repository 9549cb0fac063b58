//! Adapter implementations
//!
//! - JSON file and in-memory storage for the KeyValueStorage port
//! - Blocking reqwest client for the PixBank REST API, with the request
//!   authenticator
//! - Mock backend for tests

pub mod file_storage;
pub mod http;
pub mod memory_storage;

#[cfg(test)]
pub mod mock_backend;
