//! Customer segmentation dashboard: headless page controllers for the
//! prediction form, navbar and counters plus the web and CLI fronts
//! that drive them.

pub mod catalog;
pub mod client;
pub mod counters;
pub mod dom;
pub mod form;
pub mod globals;
pub mod helpers;
pub mod models;
pub mod navbar;
pub mod opts;
pub mod page;
pub mod predict;
pub mod prelude;
pub mod render;
pub mod web;
