//! Business rules between the HTTP handlers and the stores.

mod account;
mod message;
mod validation;
pub use account::AccountService;
pub use message::MessageService;
pub use validation::{RequestValidator, MESSAGE_MAX_LENGTH, PASSWORD_MIN_LENGTH};
