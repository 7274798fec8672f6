//! Core domain types: the menu model, storage trait, and error hierarchy

pub mod error;
pub mod menu;
pub mod service;

pub use error::{ErrorResponse, MenuError};
pub use menu::{MenuItem, MenuPatch, MenuPayload};
pub use service::MenuStore;
