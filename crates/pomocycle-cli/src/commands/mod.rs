pub mod cache;
pub mod config;
pub mod notes;
pub mod run;
