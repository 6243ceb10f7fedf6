use crate::{Connection, Result, SqlWriter};
use std::{borrow::Cow, future::Future};

/// Entry point of a backend: names the dialect and opens connections.
pub trait Driver: Send + Sync {
    type Connection: Connection<Driver = Self>;
    type SqlWriter: SqlWriter;

    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;

    /// Open a connection to the database located by `url`.
    fn connect(
        &self,
        url: Cow<'static, str>,
    ) -> impl Future<Output = Result<Self::Connection>> + Send {
        Self::Connection::connect(url)
    }
}
