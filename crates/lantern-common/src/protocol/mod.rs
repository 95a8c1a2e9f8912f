pub mod callback;
pub mod envelope;

pub use callback::{CallbackInvocation, SCRIPT_GLOBAL};
pub use envelope::{CallRequest, ChannelMessage};
