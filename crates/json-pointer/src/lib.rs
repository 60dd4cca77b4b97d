mod macros;

mod error;
mod json_pointer;
mod parser;

pub use error::ParseJsonPointerError;
pub use json_pointer::JsonPointer;
