pub mod component;
pub mod generation;
pub mod message;
pub mod session;
