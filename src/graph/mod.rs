pub mod canvas;
pub mod conversion;
pub mod definition;

pub use canvas::*;
pub use conversion::*;
pub use definition::*;
