pub mod acquisition;
pub mod error;
pub mod header;
pub mod patient;
pub mod samples;

pub use acquisition::*;
pub use error::*;
pub use header::*;
pub use patient::*;
pub use samples::*;
