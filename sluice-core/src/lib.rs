mod as_value;
mod column;
mod connection;
mod container;
mod driver;
mod error;
mod executor;
mod from_row;
mod insert;
mod query;
mod table;
mod table_ref;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use connection::*;
pub use container::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use from_row::*;
pub use insert::*;
pub use query::*;
pub use table::*;
pub use table_ref::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
