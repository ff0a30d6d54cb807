pub mod play;
pub mod song;
