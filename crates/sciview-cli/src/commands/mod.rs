//! CLI command implementations.

pub mod check;
pub mod doctor;
pub mod formats;
pub mod inspect;
pub mod json_output;
