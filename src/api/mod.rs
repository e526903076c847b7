//! API module - JSON API and HTML form handlers

pub mod dto;
pub mod pages;
pub mod rest;
pub mod upload;

pub use pages::create_pages_router;
pub use rest::{create_rest_router, AppState};
