pub mod config;
pub mod handlers;
pub mod models;
pub mod ocr;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
