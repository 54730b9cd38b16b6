// src/commands/mod.rs
pub mod check;
pub mod common;
pub mod dump;
pub mod parse_type;
pub mod version;
