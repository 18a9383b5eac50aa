//! Persistence adapters.

pub mod file_credentials;

pub use file_credentials::FileCredentialStorage;
