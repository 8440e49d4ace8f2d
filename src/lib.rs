pub mod audio;
pub mod event;
pub mod http;
pub mod library;
pub mod ui;
pub mod util;
