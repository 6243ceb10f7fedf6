use crate::decode_column::{ColumnMetadata, decode_column};
use convert_case::{Case, Casing};
use syn::{Data, DeriveInput, Error, Fields, LitStr, Result, spanned::Spanned};

pub(crate) struct TableMetadata<'a> {
    pub(crate) item: &'a DeriveInput,
    pub(crate) name: String,
    pub(crate) schema: Option<String>,
    pub(crate) columns: Vec<ColumnMetadata>,
}

pub(crate) fn decode_table(item: &DeriveInput) -> Result<TableMetadata<'_>> {
    let Data::Struct(data) = &item.data else {
        return Err(Error::new(
            item.span(),
            "Sluice derives are available on structs only",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new(
            data.fields.span(),
            "Sluice derives require a struct with named fields",
        ));
    };
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut schema = None;
    for attr in item.attrs.iter().filter(|v| v.path().is_ident("sluice")) {
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                name = arg.value()?.parse::<LitStr>()?.value();
            } else if arg.path.is_ident("schema") {
                schema = Some(arg.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(arg.error(
                    "Unknown table attribute, use it like: `#[sluice(name = \"my_table\", schema = \"my_schema\")]`",
                ));
            }
            Ok(())
        })?;
    }
    let columns = fields
        .named
        .iter()
        .map(decode_column)
        .collect::<Result<Vec<_>>>()?;
    Ok(TableMetadata {
        item,
        name,
        schema: schema.filter(|v| !v.is_empty()),
        columns,
    })
}
