pub mod api;
pub mod error;
pub mod index;
pub mod predict;
