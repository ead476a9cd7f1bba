pub mod checksum;
pub mod path;

pub use checksum::*;
pub use path::*;
