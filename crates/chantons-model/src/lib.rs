pub mod catalogue;
pub mod lyrics;

pub use catalogue::*;
pub use lyrics::*;
