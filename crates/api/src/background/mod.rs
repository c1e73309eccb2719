//! Background tasks spawned at server startup.

pub mod presence_sweep;
