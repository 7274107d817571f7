pub mod append;
pub mod create;
