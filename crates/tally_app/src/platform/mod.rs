//! Command line driver: argument parsing, configuration, logging and output.
mod app;
mod cli;
mod config;
mod logging;
mod render;

pub use app::run_app;
