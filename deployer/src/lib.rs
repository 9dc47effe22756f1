//! Marathon Deploy Library
//!
//! Create-or-update deployment of a Marathon application: decide between
//! create and update, force a restart when the update queued nothing, then
//! wait for the deployment to leave the queue.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod utils;
pub mod workers;
