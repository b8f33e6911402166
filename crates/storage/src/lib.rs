#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod dto;
pub mod json_file;
pub mod memory;

pub use json_file::{JsonFileError, JsonFileStorage};
pub use memory::MemoryStorage;
