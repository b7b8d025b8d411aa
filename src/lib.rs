pub mod cli;
pub mod client;
pub mod core;
pub mod device;
pub mod error;
pub mod manager;
pub mod notify;
pub mod platform;
pub mod worker;

pub use error::{PushError, Result};
