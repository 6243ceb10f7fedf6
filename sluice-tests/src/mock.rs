use sluice::{
    Connection, Container, DatabaseId, Driver, Error, Executor, GenericSqlWriter, Query,
    QueryResult, Result, RowLabeled, RowsAffected, Value,
    stream::{self, Stream},
};
use std::{
    borrow::Cow,
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Driver of the in-memory [`MockConnection`], it writes generic SQL.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockDriver;

impl Driver for MockDriver {
    type Connection = MockConnection;
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "mock";

    fn sql_writer(&self) -> GenericSqlWriter {
        GenericSqlWriter::new()
    }
}

#[derive(Default)]
struct MockState {
    queries: Vec<String>,
    responses: VecDeque<Vec<Result<QueryResult>>>,
}

/// Connection recording every statement it runs and replaying scripted responses.
///
/// Each call to [`Executor::run`] consumes the next scripted response, when none
/// is left the statement produces no result at all. Clones share the same state,
/// so a test can keep a handle while the connection is moved elsewhere.
#[derive(Default, Clone)]
pub struct MockConnection {
    state: Arc<Mutex<MockState>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the items produced by the next statement that is not yet scripted.
    pub fn respond(&self, items: impl IntoIterator<Item = Result<QueryResult>>) -> &Self {
        self.state()
            .responses
            .push_back(items.into_iter().collect());
        self
    }

    /// Script a response made of rows sharing the same `labels`.
    pub fn respond_rows<R>(&self, labels: &[&str], rows: impl IntoIterator<Item = R>) -> &Self
    where
        R: IntoIterator<Item = Value>,
    {
        let labels: Arc<[String]> = labels.iter().map(|v| v.to_string()).collect();
        self.respond(rows.into_iter().map(|row| {
            Ok(QueryResult::Row(RowLabeled::new(
                labels.clone(),
                row.into_iter().collect(),
            )))
        }))
    }

    /// Script a response reporting `rows_affected`.
    pub fn respond_affected(&self, rows_affected: u64) -> &Self {
        self.respond([Ok(QueryResult::Affected(RowsAffected {
            rows_affected,
            last_affected_id: None,
        }))])
    }

    /// Script a failing response.
    pub fn respond_error(&self, error: Error) -> &Self {
        self.respond([Err(error)])
    }

    /// Statements received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.state().queries.clone()
    }
}

impl Executor for MockConnection {
    type Driver = MockDriver;

    fn driver(&self) -> &MockDriver {
        &MockDriver
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let response = {
            let mut state = self.state();
            state.queries.push(query.as_str().to_owned());
            state.responses.pop_front().unwrap_or_default()
        };
        log::trace!("Mock replying {} items to:\n{}", response.len(), query);
        stream::iter(response)
    }
}

impl Connection for MockConnection {
    async fn connect(url: Cow<'static, str>) -> Result<MockConnection> {
        let prefix = format!("{}://", MockDriver::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Mock connection URL must start with `{}`, got `{}`",
                prefix, url
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(MockConnection::new())
    }
}

/// Container handing out [`MockConnection`]s registered by database name.
#[derive(Default)]
pub struct MockContainer {
    databases: HashMap<DatabaseId, MockConnection>,
    acquired: AtomicUsize,
}

impl MockContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(
        mut self,
        database: impl Into<DatabaseId>,
        connection: MockConnection,
    ) -> Self {
        self.databases.insert(database.into(), connection);
        self
    }

    /// Number of successful acquisitions.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::Relaxed)
    }
}

impl Container for MockContainer {
    type Connection = MockConnection;

    fn driver(&self) -> &MockDriver {
        &MockDriver
    }

    async fn acquire(&self, database: &DatabaseId) -> Result<MockConnection> {
        let Some(connection) = self.databases.get(database) else {
            return Err(Error::msg(format!("No database named `{}`", database)));
        };
        self.acquired.fetch_add(1, Ordering::Relaxed);
        Ok(connection.clone())
    }
}
