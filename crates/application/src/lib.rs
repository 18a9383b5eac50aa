//! Storefront Application - request client and token store
//!
//! This crate holds the authenticated request client with its
//! refresh-and-retry behavior, the role-keyed token store, and the ports
//! the infrastructure layer implements. Everything here is driven through
//! traits so the retry logic is testable with fake transports and storage.

pub mod auth;
pub mod client;
pub mod error;
pub mod ports;

pub use auth::TokenStore;
pub use client::ApiClient;
pub use error::{ApplicationError, ApplicationResult};
