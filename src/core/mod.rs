pub mod loader;
pub mod log_file;
pub mod lookup;
pub mod song_file;
pub mod time_dim;
