mod cart;
mod catalog;
mod pagination;

pub use cart::*;
pub use catalog::*;
pub use pagination::*;
