pub mod api;
pub mod config;
pub mod error;
pub mod humanizer;
pub mod processor;
pub mod request;
pub mod util;
