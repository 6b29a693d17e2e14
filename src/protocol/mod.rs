mod codec;
mod message;

pub use codec::{decode_message, encode_message, Header, MessageTag, HEADER_SIZE};
pub use message::PipesortMessage;
