pub mod blog;
pub mod image;
pub mod user;
