//! Host-side wiring: inputs, options and the run entry point

pub mod config;
pub mod options;
pub mod run;
pub mod settings;
