// Public API for integration tests and potential library usage

pub mod config;
pub mod error;
pub mod layout;
pub mod names;
pub mod protocol;
pub mod state;
pub mod timers;
pub mod types;
pub mod view;
pub mod ws;
