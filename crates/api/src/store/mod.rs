//! In-memory shared state: the voting board and the presence roster.
//!
//! Both are process-local by design. Sessions, chat, components and
//! generation receipts go to Postgres; live coordination state does not
//! survive a restart and does not need to.

pub mod presence;
pub mod voting;
