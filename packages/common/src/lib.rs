pub mod error;
pub mod result;
pub mod store;
pub mod upload;

pub use error::*;
pub use result::*;
pub use store::*;
pub use upload::*;
