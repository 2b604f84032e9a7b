pub mod common;
pub mod completions;
pub mod config;
pub mod feed;
pub mod post;
pub mod who;
