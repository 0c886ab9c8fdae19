mod dto;
mod error;
mod http_mail_dispatcher;
mod noop_dispatcher;
mod notification_dispatcher;

pub use dto::{DispatchOutcome, HttpMailDispatcherConfig};
pub use error::*;
pub use http_mail_dispatcher::*;
pub use noop_dispatcher::*;
pub use notification_dispatcher::*;
