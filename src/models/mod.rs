pub mod form;
pub mod incident;

pub use form::*;
pub use incident::*;
