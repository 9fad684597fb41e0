pub mod config;
pub mod entries;
pub mod journals;
pub mod menu;
