pub mod audio;
pub mod build;
pub mod package;
