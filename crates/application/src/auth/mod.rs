//! Authentication state: the role-keyed token store.

pub mod token_store;

pub use token_store::TokenStore;
