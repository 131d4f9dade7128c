pub mod dispatch;
pub mod interview;
pub mod status;

pub use dispatch::dispatch;
pub use interview::{InputAction, Interview, parse_input};
