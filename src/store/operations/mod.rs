pub mod read;
pub mod write;

pub use read::list_messages;
pub use write::{ensure_schema, insert_message};
