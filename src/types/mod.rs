mod decl;

pub use decl::*;
