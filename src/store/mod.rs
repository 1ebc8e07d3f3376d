pub mod json;
pub mod matrix;

pub use json::{read_json, to_json_bytes, write_all, write_bytes, write_json};
pub use matrix::priority_matrix_bytes;
