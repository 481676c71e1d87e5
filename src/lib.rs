pub mod app;
pub mod books;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod validate;
