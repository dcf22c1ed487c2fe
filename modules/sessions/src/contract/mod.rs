pub mod model;

pub use model::{Claims, Session};
