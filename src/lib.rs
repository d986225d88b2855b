pub mod channels;
pub mod config;
pub mod data_models;
pub mod errors;
pub mod file_processor;
pub mod model;
pub mod parsers;
pub mod preparer;
pub mod start_release;
pub mod utils;
pub mod validation;
