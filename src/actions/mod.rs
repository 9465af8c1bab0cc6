pub mod about;
pub mod list_known;
pub mod list_old_files;
