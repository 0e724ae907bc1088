mod binder;
mod delete;
mod insert;
mod select;

pub use binder::ParamBinder;
pub use delete::{Delete, DeleteFrom};
pub use insert::{Insert, InsertInto};
pub use select::{Select, SelectWithColumns, SelectWithTable};
