pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod engagement;
pub mod filter;
pub mod workspace;
