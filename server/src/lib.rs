pub mod catalog;
pub mod commands;
pub mod config;
pub mod disposition;
pub mod ffmpeg;
pub mod library;
pub mod logging;
pub mod resolve;
pub mod routes;

#[cfg(test)]
mod stub;
