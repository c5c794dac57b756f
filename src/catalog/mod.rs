mod item;
mod load;
mod parse;

pub use item::{Catalog, Item};
pub use load::load_catalog;
