pub mod catalog;
pub mod wire;
