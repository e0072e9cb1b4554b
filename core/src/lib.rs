// Drowsiness Monitor - Core Library

pub mod auth;
pub mod image;
pub mod models;

pub use auth::*;
pub use models::*;
