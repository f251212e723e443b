mod copy;

pub use copy::*;
