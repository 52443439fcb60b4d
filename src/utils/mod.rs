pub mod file_name;

pub use file_name::{file_extension, storage_key};
