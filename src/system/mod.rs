pub mod collector;
pub mod memory;
