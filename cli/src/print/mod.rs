mod diagnostics;
mod tokens;

pub use diagnostics::{code_frame, error_message, parse_error, runtime_error};
pub use tokens::print as tokens;
