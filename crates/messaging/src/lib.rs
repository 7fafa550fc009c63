//! In-process message-channel pair for host/panel-document traffic.
//!
//! A [`MessageChannel`] hands out two entangled [`MessagePort`]s. Anything
//! posted on one endpoint arrives on the other, in send order, once the
//! receiving endpoint has been started. Ports themselves can travel inside
//! a [`MessageEvent`] transfer list, which is how a host hands a panel
//! document its end of a private channel.

pub mod channel;
pub mod event;

pub use channel::{MessageChannel, MessagePort};
pub use event::MessageEvent;
