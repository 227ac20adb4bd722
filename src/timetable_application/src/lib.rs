pub mod error;
pub mod messages;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::AccountError;
pub use messages::Messages;
pub use use_cases::*;
