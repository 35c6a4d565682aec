// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sanitizer;
pub mod utils;

pub use sanitizer::{Cleaned, Sanitizer, Strategy, clean};
