pub mod key_value_file;

pub use key_value_file::{FileKeyValueStore, DEFAULT_KEY_VALUE_FILE};
