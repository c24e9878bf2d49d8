pub mod client;
pub mod client_id;
pub mod commands;
pub mod config;
pub mod render;
pub mod run;
pub mod view;
