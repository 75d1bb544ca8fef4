pub mod indicators;
pub mod markets;
