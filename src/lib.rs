pub mod backend;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod ipc;
pub mod service;

#[cfg(test)]
pub mod test_utils;
