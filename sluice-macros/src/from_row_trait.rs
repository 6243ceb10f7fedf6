use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn from_row_trait(table: &TableMetadata) -> TokenStream {
    let item = table.item;
    let struct_name = &item.ident;
    let target = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let decoded = table.columns.iter().filter(|c| !c.ignored);
    let holders = decoded.clone().map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        quote!(let mut #ident: ::std::option::Option<#ty> = ::std::option::Option::None;)
    });
    let assignments = decoded.clone().map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        let name = &c.name;
        quote! {
            #name => {
                #ident = ::std::option::Option::Some(
                    <#ty as ::sluice::AsValue>::try_from_value(__value__).with_context(|| {
                        format!("While decoding column `{}` of {}", #name, #target)
                    })?,
                );
            }
        }
    });
    let fields = table.columns.iter().map(|c| {
        let ident = &c.ident;
        let name = &c.name;
        if c.ignored {
            quote!(#ident: ::std::default::Default::default())
        } else if c.default {
            quote!(#ident: #ident.unwrap_or_default())
        } else {
            quote! {
                #ident: #ident.ok_or_else(|| {
                    ::sluice::Error::new(::sluice::DecodeError::MissingColumn {
                        column: #name.into(),
                        target: #target,
                    })
                })?
            }
        }
    });
    quote! {
        impl #impl_generics ::sluice::FromRow for #struct_name #ty_generics #where_clause {
            fn from_row(__row__: ::sluice::RowLabeled) -> ::sluice::Result<Self> {
                use ::sluice::Context as _;
                #(#holders)*
                let __values__ = __row__.values.into_vec();
                for (__label__, __value__) in ::std::iter::zip(__row__.labels.iter(), __values__) {
                    match __label__.as_str() {
                        #(#assignments)*
                        _ => {}
                    }
                }
                ::std::result::Result::Ok(Self {
                    #(#fields,)*
                })
            }
        }
    }
}
