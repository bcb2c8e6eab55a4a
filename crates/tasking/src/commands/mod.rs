//! Non-interactive command handlers.

mod handlers;

pub use handlers::run;
