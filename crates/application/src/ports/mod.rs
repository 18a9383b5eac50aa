//! Ports implemented by the infrastructure layer.

pub mod credential_storage;
pub mod transport;

pub use credential_storage::{CredentialStorage, MemoryCredentialStorage, StorageError};
pub use transport::{
    HttpTransport, TransportBody, TransportError, TransportRequest, TransportResponse,
};
