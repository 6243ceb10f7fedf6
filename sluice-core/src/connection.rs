use crate::{Executor, Result};
use std::{borrow::Cow, future::Future};

/// A live handle to a database, the direct execution context.
pub trait Connection: Executor {
    /// Open a connection to the database located by `url`, the scheme selects the driver.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;
}
