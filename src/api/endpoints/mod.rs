//! API endpoint handlers.
//!
//! One module per resource. Handlers pull shared state through
//! `State<ApiContext>` and return typed JSON views.

pub mod export;
pub mod files;
pub mod health;
pub mod search;
pub mod vocabularies;
