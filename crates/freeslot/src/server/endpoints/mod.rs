pub mod analysis;
pub mod export;
pub mod roster;
pub mod status;
