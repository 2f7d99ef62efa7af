pub mod api;
pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
pub mod runner;
pub mod state;

#[cfg(test)]
mod tests;
