mod dispatch_outcome;
mod http_mail_dispatcher_config;
mod mail_message;

pub use dispatch_outcome::*;
pub use http_mail_dispatcher_config::*;
pub use mail_message::*;
