pub mod clean;
pub mod info;
