pub mod app;
pub mod catalog;
pub mod config;
pub mod input;
pub mod normalize;
pub mod panel;
pub mod render;
pub mod search;
pub mod terminal;
pub mod weather;
