// Handlers module

pub mod get_messages;
pub mod post_message;
pub mod rejection;
pub mod upload;

pub use get_messages::get_messages_handler;
pub use post_message::post_message_handler;
pub use rejection::handle_rejection;
pub use upload::upload_handler;
