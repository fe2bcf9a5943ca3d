mod defaults;
mod dialect;
pub mod types;

pub use dialect::GbaseDialect;
