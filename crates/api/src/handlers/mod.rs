pub mod chat;
pub mod collaboration;
pub mod generation;
pub mod session;
pub mod voting;
