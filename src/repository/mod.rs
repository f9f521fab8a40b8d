pub mod errors;
pub mod memory;
pub mod seed;
