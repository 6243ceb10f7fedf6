use crate::{
    Executor, Query, QueryResult, Result,
    stream::{Stream, StreamExt},
};
use async_stream::stream;
use std::{
    borrow::Cow,
    fmt::{self, Display},
    future::Future,
    pin::pin,
};

/// Names one of the databases a [`Container`] can reach.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseId(Cow<'static, str>);

impl DatabaseId {
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for DatabaseId {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for DatabaseId {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of connections to one or more databases: a pool, an application context.
pub trait Container: Send + Sync {
    type Connection: Executor;

    fn driver(&self) -> &<Self::Connection as Executor>::Driver;

    /// Hand out a connection to `database`, it is released when dropped.
    fn acquire(
        &self,
        database: &DatabaseId,
    ) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// Executor running every query on a connection acquired from a [`Container`].
///
/// Each call to [`Executor::run`] acquires its own connection and keeps it until
/// the returned stream is exhausted or dropped. An acquisition failure is the
/// only item of the stream, as returned by the container.
pub struct OnDatabase<'c, C: Container> {
    pub database: DatabaseId,
    pub container: &'c C,
}

impl<'c, C: Container> OnDatabase<'c, C> {
    pub fn new(database: impl Into<DatabaseId>, container: &'c C) -> Self {
        Self {
            database: database.into(),
            container,
        }
    }
}

impl<'c, C: Container> Executor for OnDatabase<'c, C> {
    type Driver = <C::Connection as Executor>::Driver;

    fn driver(&self) -> &Self::Driver {
        self.container.driver()
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let container = self.container;
        let database = self.database.clone();
        stream! {
            log::trace!("Acquiring a connection to `{}`", database);
            let mut connection = match container.acquire(&database).await {
                Ok(v) => v,
                Err(e) => {
                    log::error!("Could not acquire a connection to `{}`: {:#}", database, e);
                    yield Err(e);
                    return;
                }
            };
            let mut results = pin!(connection.run(query));
            while let Some(result) = results.next().await {
                yield result;
            }
        }
    }
}
