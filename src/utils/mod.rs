pub mod clipboard;
pub mod input;
pub mod logging;
pub mod scroll;
pub mod url;
