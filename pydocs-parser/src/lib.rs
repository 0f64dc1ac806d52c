pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod http;
pub mod logging;
pub mod module;
pub mod output;
