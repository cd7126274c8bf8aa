pub mod extension;
pub mod panic;
pub mod testing;
