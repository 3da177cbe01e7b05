pub mod api; // HTTP surface
pub mod cache;
pub mod config;
pub mod export;
pub mod pipeline; // load → merge → normalize
pub mod portal;
pub mod search;
pub mod stats;
pub mod table;
pub mod vocabulary;
