pub mod api;
pub mod code;
pub mod models;
pub mod validation;
