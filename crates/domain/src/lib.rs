//! Storefront Domain - Core client types
//!
//! This crate defines the domain model for the storefront API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod request;

pub use auth::Role;
pub use catalog::{
    ArticleSnapshot, Cart, CartArticle, Order, OrderStatus, PriceRecord, effective_price,
    order_total,
};
pub use config::ClientConfig;
pub use envelope::{Envelope, ErrorDetail};
pub use error::{DomainError, DomainResult};
pub use request::HttpMethod;
