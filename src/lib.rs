pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod state;
pub mod suffix;
#[cfg(test)]
pub mod testing;
