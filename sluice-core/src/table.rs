use crate::{
    Column, DecodeError, Driver, Error, Executor, FromRow, Insert, Query, Result, SqlWriter,
    TableRef, future::Either, stream::TryStreamExt,
};
use futures::{TryFutureExt, future};
use std::{future::Future, pin::pin};

/// Schema an insert targets: the explicit one if any, then the one declared by
/// the model. An empty name means unqualified.
pub fn resolve_schema<'a>(explicit: Option<&'a str>, declared: Option<&'a str>) -> Option<&'a str> {
    explicit.or(declared).filter(|v| !v.is_empty())
}

/// A model persisted as one row of a table.
///
/// Derive it with `#[derive(Table)]` or implement [`Table::columns`] by hand for
/// models whose columns are only known at runtime. The insert methods build the
/// statement before returning the future, so the future does not borrow `self`
/// beyond the executor call.
pub trait Table {
    fn table_name() -> &'static str;

    /// Schema declared by the model, `None` for unqualified tables. The insert
    /// methods use it unless the caller passes an explicit schema.
    fn schema_name() -> Option<&'static str> {
        None
    }

    /// Columns with the value they currently hold, in declaration order.
    fn columns(&self) -> Vec<Column>;

    fn table_ref(schema: Option<&str>) -> TableRef
    where
        Self: Sized,
    {
        TableRef::new(Self::table_name())
            .with_schema(resolve_schema(schema, Self::schema_name()).map(str::to_owned))
    }

    /// Render the single row insert of this instance for the dialect of `driver`.
    fn insert_query<D: Driver>(&self, driver: &D, schema: Option<&str>, returning: bool) -> Query
    where
        Self: Sized,
    {
        let columns = self.columns();
        log::trace!(
            "Reflected {} columns from {}",
            columns.len(),
            Self::table_name()
        );
        let insert = Insert::single(Self::table_ref(schema), columns, returning);
        let mut sql = String::with_capacity(256);
        driver.sql_writer().write_insert(&mut sql, &insert);
        sql.into()
    }

    /// Insert this instance, listing only the columns that are set. The response is discarded.
    fn insert_non_returning<Exec: Executor>(
        &self,
        executor: &mut Exec,
        schema: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized,
    {
        let query = self.insert_query(executor.driver(), schema, false);
        log::debug!("{}", query);
        executor.execute(query).map_ok(|_| ())
    }

    /// Insert this instance and decode the stored row back, server side defaults included.
    fn insert<Exec: Executor>(
        &self,
        executor: &mut Exec,
        schema: Option<&str>,
    ) -> impl Future<Output = Result<Self>> + Send
    where
        Self: FromRow,
    {
        self.insert_as::<Self, Exec>(executor, schema)
    }

    /// Insert this instance and decode the stored row as `T`.
    ///
    /// Fails with [`DecodeError::FailedToDecodeWithReturning`] when no row comes
    /// back. Only the first row is decoded, any other is logged and ignored.
    fn insert_as<T: FromRow, Exec: Executor>(
        &self,
        executor: &mut Exec,
        schema: Option<&str>,
    ) -> impl Future<Output = Result<T>> + Send
    where
        Self: Sized,
    {
        let query = self.insert_query(executor.driver(), schema, true);
        log::debug!("{}", query);
        let rows = executor.fetch(query);
        async move {
            let mut rows = pin!(rows);
            let Some(row) = rows.try_next().await? else {
                let error = Error::new(DecodeError::FailedToDecodeWithReturning);
                log::error!("{:#}", error);
                return Err(error);
            };
            if rows.try_next().await?.is_some() {
                log::warn!(
                    "The insert into {} returned more than one row, only the first one is decoded",
                    Self::table_name()
                );
            }
            T::from_row(row).map_err(|e| {
                let e = e.context(format!(
                    "While decoding the row returned by the insert into {}",
                    Self::table_name()
                ));
                log::error!("{:#}", e);
                e
            })
        }
    }

    /// Insert every item with a single multi row statement, nothing is decoded.
    ///
    /// Columns missing or unset on an item are sent as `DEFAULT`, the caller
    /// must make sure those columns have a default or a sequence. An empty
    /// `items` resolves right away without touching the executor.
    fn batch_insert<'a, Exec, It>(
        executor: &mut Exec,
        items: It,
        schema: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized + 'a,
        Exec: Executor,
        It: IntoIterator<Item = &'a Self>,
    {
        let insert = Insert::batch(
            Self::table_ref(schema),
            items.into_iter().map(Self::columns),
        );
        if insert.is_empty() {
            log::trace!("Nothing to insert into {}", Self::table_name());
            return Either::Left(future::ready(Ok::<_, Error>(())));
        }
        let mut sql = String::with_capacity(256);
        executor.driver().sql_writer().write_insert(&mut sql, &insert);
        let query = Query::from(sql);
        log::debug!("{}", query);
        Either::Right(executor.execute(query).map_ok(|_| ()))
    }
}
