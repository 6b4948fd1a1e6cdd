//! FreeSlot: students submit weekly free-time availability, an administrator
//! asks for the slots common to all of them. Analysis consults a best-effort
//! LLM collaborator and deterministically falls back to local set
//! intersection.

pub mod analysis;
pub mod config;
pub mod export;
pub mod roster;
pub mod server;
pub mod types;
