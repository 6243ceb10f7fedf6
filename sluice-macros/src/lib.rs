mod decode_column;
mod decode_table;
mod from_row_trait;
mod table_trait;

use decode_table::decode_table;
use from_row_trait::from_row_trait;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};
use table_trait::table_trait;

/// Implements `Table` for a struct with named fields.
///
/// Struct attributes: `#[sluice(name = "..", schema = "..")]`, the name defaults
/// to the struct name in snake case. Field attributes: `#[sluice(name = "..")]`
/// to rename the column, `#[sluice(ignore)]` for fields that are not columns.
/// Fields of type `Passive<T>` are left to the database when `NotSet`.
#[proc_macro_derive(Table, attributes(sluice))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match decode_table(&input) {
        Ok(table) => table_trait(&table).into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Implements `FromRow`, matching row labels with column names.
///
/// A column missing from the row is an error unless the field is `Passive` or
/// marked `#[sluice(default)]`, then it takes `Default::default()`.
#[proc_macro_derive(FromRow, attributes(sluice))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match decode_table(&input) {
        Ok(table) => from_row_trait(&table).into(),
        Err(e) => e.to_compile_error().into(),
    }
}
