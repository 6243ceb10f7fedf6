use syn::{Field, Ident, LitStr, Result, Type, ext::IdentExt, spanned::Spanned};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Column name, the field name without leading underscore unless overridden.
    pub(crate) name: String,
    /// The field type is `Passive<T>`.
    pub(crate) passive: bool,
    /// Use `Default` when the row does not carry the column.
    pub(crate) default: bool,
    /// Not a column, never written and always `Default` when decoded.
    pub(crate) ignored: bool,
}

fn is_passive(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|v| v.ident == "Passive"),
        _ => false,
    }
}

pub(crate) fn decode_column(field: &Field) -> Result<ColumnMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new(field.span(), "Field is expected to have a name"));
    };
    let mut name = ident.unraw().to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let passive = is_passive(&field.ty);
    let mut metadata = ColumnMetadata {
        ident,
        ty: field.ty.clone(),
        name,
        passive,
        default: passive,
        ignored: false,
    };
    for attr in field.attrs.iter().filter(|v| v.path().is_ident("sluice")) {
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                metadata.name = arg.value()?.parse::<LitStr>()?.value();
            } else if arg.path.is_ident("default") {
                metadata.default = true;
            } else if arg.path.is_ident("ignore") {
                metadata.ignored = true;
                metadata.default = true;
            } else {
                return Err(arg.error(
                    "Unknown column attribute, expected one of: `name = \"my_column\"`, `default`, `ignore`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(metadata)
}
