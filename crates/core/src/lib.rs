//! Domain logic for the MechaCrew collaborative builder.
//!
//! This crate has zero internal dependencies so the API layer, the
//! persistence layer, and the generation client can all share the same
//! types, constants, and the voting engine itself.

pub mod chat;
pub mod component;
pub mod error;
pub mod presence;
pub mod types;
pub mod voting;
