//! Oficina Sapiens - Console administrativo de olimpíadas escolares
//!
//! Aplicação desktop nativa construída com Rust e egui.

#![allow(dead_code)]

pub mod models;
pub mod data;
pub mod db;
pub mod services;
pub mod ui;
pub mod utils;

// Re-exports
pub use data::AppData;
pub use db::Database;
pub use models::*;
pub use ui::{AppState, View};
