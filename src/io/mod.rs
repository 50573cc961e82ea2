pub mod export;
pub mod pdf;

pub use export::*;
pub use pdf::*;
