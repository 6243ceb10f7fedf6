use crate::{Result, RowLabeled};

/// Types that can be built from a result row.
///
/// Derive it with `#[derive(FromRow)]`, columns are matched to fields by name.
pub trait FromRow: Sized {
    fn from_row(row: RowLabeled) -> Result<Self>;
}

impl FromRow for RowLabeled {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row)
    }
}
