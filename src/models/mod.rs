// src/models/mod.rs

pub mod report;
