#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod alias;
mod arc;
mod daily_sets;
mod date_sets;
mod error;
mod exercise_name;
mod exercise_set;
mod import;
mod sanitize;
mod service;
mod sets_string;
mod training;

pub use alias::*;
pub use arc::*;
pub use daily_sets::*;
pub use date_sets::*;
pub use error::*;
pub use exercise_name::*;
pub use exercise_set::*;
pub use import::*;
pub use sanitize::*;
pub use service::*;
pub use sets_string::*;
pub use training::*;
