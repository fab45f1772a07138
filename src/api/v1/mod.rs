pub mod matrix;
pub mod routes;

pub use matrix::*;
pub use routes::*;
