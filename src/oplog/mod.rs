mod reader;
mod types;
mod writer;

pub use reader::read_operation_log;
pub use types::*;
pub use writer::{write_log_file, write_operation_log, OpLogError};
