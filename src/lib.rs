pub mod catalog;
pub mod chat;
pub mod config;
pub mod event;
pub mod http;
pub mod playback;
pub mod ui;
pub mod util;
