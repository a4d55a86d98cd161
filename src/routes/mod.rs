// src/routes/mod.rs
pub mod binary;

pub use binary::{
    analyze_binary, checksec_binary, health_check, read_saved_strings, strings_binary,
    upload_binary,
};
