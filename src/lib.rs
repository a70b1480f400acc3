pub mod audit;
pub mod config;
pub mod core;
pub mod pdf;
pub mod providers;
pub mod reasoner;
pub mod structure;
