pub mod errors;

pub use errors::{NearsideError, NearsideErrorCategory, NearsideResult};
