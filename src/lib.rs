pub mod command;
pub mod config;
pub mod effects;
pub mod host;
pub mod osc;
pub mod server;
pub mod session;
pub mod status;
