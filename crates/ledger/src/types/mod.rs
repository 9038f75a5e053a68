pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::*;
pub use requests::*;
pub use responses::*;
