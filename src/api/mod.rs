pub mod fields;
pub mod localstream;
pub mod models;

pub use localstream::*;
pub use models::*;
