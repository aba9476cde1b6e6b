pub mod read;
pub mod source;

pub use read::*;
pub use source::*;
