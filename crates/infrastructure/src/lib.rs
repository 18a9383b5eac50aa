//! Storefront Infrastructure - adapters for the application ports
//!
//! Concrete implementations: a reqwest-backed HTTP transport and a
//! file-backed credential store.

pub mod adapters;
pub mod persistence;

pub use adapters::ReqwestTransport;
pub use persistence::FileCredentialStorage;
