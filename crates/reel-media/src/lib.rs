pub mod config;
pub mod listing;
pub mod media;
pub mod platform;
pub mod scan;
