pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod credentials_file;
pub mod identity;
pub mod instructions;
pub mod session;
pub mod token;
