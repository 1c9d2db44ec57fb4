use crate::input::SetDecl;
use inflector::cases::snakecase::to_snake_case;
use proc_macro2::{Ident, Span, TokenStream};
use std::collections::HashMap;

pub fn set_from_decl(decl: &SetDecl) -> syn::Result<TokenStream> {
    let SetDecl {
        attrs,
        attach_only,
        vis,
        name,
        contracts,
    } = decl;

    let mut seen = HashMap::new();
    let mut fields = Vec::with_capacity(contracts.len());
    for contract in contracts {
        let field = field_name(&contract.name.to_string(), contract.name.span());
        if let Some(previous) = seen.insert(field.to_string(), &contract.name) {
            return Err(syn::Error::new(
                contract.name.span(),
                collision_message(&previous.to_string(), &contract.name.to_string(), &field),
            ));
        }
        fields.push(field);
    }

    let names: Vec<String> = contracts.iter().map(|c| c.name.to_string()).collect();
    let types: Vec<_> = contracts.iter().map(|c| &c.constructor).collect();
    let first = types[0];

    let mode = if *attach_only {
        quote! { AttachOnly }
    } else {
        quote! { DeployOrAttach }
    };
    let builders: Vec<TokenStream> = types
        .iter()
        .map(|ty| quote! { ::contract_set::#mode<#ty> })
        .collect();
    let first_builder = &builders[0];

    let signer = quote! { <#first as ::contract_set::FactoryConstructor>::Signer };
    let context = quote! { <#first_builder as ::contract_set::Builder<#first>>::Context };

    let build = if *attach_only {
        quote! {
            pub fn build(#(#fields: #types),*) -> Self {
                Self::__bind(#(::contract_set::internal::Arc::new(#fields),)* (), None)
            }
        }
    } else {
        quote! {
            pub fn build(#(#fields: #types,)* __source: ::contract_set::SignerSource<#signer>) -> Self {
                let (__accounts, __signer) = __source.into_parts();
                Self::__bind(#(::contract_set::internal::Arc::new(#fields),)* __accounts, __signer)
            }
        }
    };

    Ok(quote! {
        #(#attrs)*
        #vis struct #name {
            #(pub #fields: #builders,)*
            __context: #context,
            __signer: ::std::option::Option<#signer>,
        }

        impl #name {
            /// The contract names, in declaration order.
            pub const NAMES: &'static [&'static str] = &[#(#names),*];

            #build

            fn __bind(
                #(#fields: ::contract_set::internal::Arc<#types>,)*
                __context: #context,
                __signer: ::std::option::Option<#signer>,
            ) -> Self {
                Self {
                    #(#fields: <#builders as ::contract_set::Builder<#types>>::bind(
                        #names,
                        #fields,
                        &__context,
                        ::std::clone::Clone::clone(&__signer),
                    ),)*
                    __context,
                    __signer,
                }
            }

            /// Returns a copy of this set with every contract bound to `signer`.
            pub fn connect(&self, signer: #signer) -> Self {
                Self::__bind(
                    #(::std::clone::Clone::clone(
                        <#builders as ::contract_set::Builder<#types>>::constructor(&self.#fields)
                    ),)*
                    ::std::clone::Clone::clone(&self.__context),
                    ::std::option::Option::Some(signer),
                )
            }

            pub fn signer(&self) -> ::std::option::Option<&#signer> {
                self.__signer.as_ref()
            }
        }

        impl ::std::clone::Clone for #name {
            fn clone(&self) -> Self {
                Self {
                    #(#fields: ::std::clone::Clone::clone(&self.#fields),)*
                    __context: ::std::clone::Clone::clone(&self.__context),
                    __signer: ::std::clone::Clone::clone(&self.__signer),
                }
            }
        }

        impl ::std::fmt::Debug for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(::std::stringify!(#name))
                    #(.field(#names, &self.#fields))*
                    .finish()
            }
        }
    })
}

fn collision_message(previous: &str, contract: &str, field: &Ident) -> String {
    if previous == contract {
        format!("contract `{}` is registered twice", contract)
    } else {
        format!(
            "contracts `{}` and `{}` both map to the field `{}`",
            previous, contract, field
        )
    }
}

/// Contract names become snake_case fields. Names that land on a keyword get a
/// trailing underscore.
pub fn field_name(contract: &str, span: Span) -> Ident {
    let snake = to_snake_case(contract);
    if syn::parse_str::<Ident>(&snake).is_ok() {
        Ident::new(&snake, span)
    } else {
        Ident::new(&format!("{}_", snake), span)
    }
}
