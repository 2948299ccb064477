//! Domain models for extracted threads

mod message;
mod thread;

pub use message::{
    EARLIER, Message, MessageBuilder, PREVIOUS_SENDER, SenderInfo, UNKNOWN_SENDER, UNKNOWN_TIME,
};
pub use thread::{NO_SUBJECT, ThreadDocument};
