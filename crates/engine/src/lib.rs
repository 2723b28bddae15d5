//! Pure decision logic: threshold evaluation and notification message
//! construction. Nothing in this crate touches a file or the network.

pub mod evaluator;
pub mod message;
