use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn table_trait(table: &TableMetadata) -> TokenStream {
    let item = table.item;
    let struct_name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let table_name = &table.name;
    let schema_name = match &table.schema {
        Some(schema) => quote!(::std::option::Option::Some(#schema)),
        None => quote!(::std::option::Option::None),
    };
    let columns = table.columns.iter().filter(|c| !c.ignored).map(|c| {
        let ident = &c.ident;
        let name = &c.name;
        let value = if c.passive {
            quote!(::sluice::Passive::to_column_value(&self.#ident))
        } else {
            quote! {
                ::sluice::ColumnValue::Set(::sluice::AsValue::as_value(
                    ::std::clone::Clone::clone(&self.#ident),
                ))
            }
        };
        quote! {
            ::sluice::Column {
                name: ::std::borrow::Cow::Borrowed(#name),
                value: #value,
            }
        }
    });
    quote! {
        impl #impl_generics ::sluice::Table for #struct_name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }
            fn schema_name() -> ::std::option::Option<&'static str> {
                #schema_name
            }
            fn columns(&self) -> ::std::vec::Vec<::sluice::Column> {
                ::std::vec![#(#columns),*]
            }
        }
    }
}
