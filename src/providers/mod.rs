//! Input provider implementations

pub mod channel;
pub mod scripted;

pub use channel::{ChannelProvider, DEFAULT_INPUT_BUFFER, InputSender};
pub use scripted::{ScriptStep, ScriptedProvider};
