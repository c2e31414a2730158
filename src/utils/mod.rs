pub mod file_icon;
pub mod file_size;
