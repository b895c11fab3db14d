pub mod financial;

pub use financial::*;
