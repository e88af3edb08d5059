pub mod json;
pub mod time;
pub mod txt;
pub mod vtt;
