pub mod cart;
pub mod order;
pub mod product;
pub mod rating;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use rating::*;
