pub mod colors;
pub mod fs;
pub mod path;
