use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, Attribute, Ident, Result, Token, Type, Visibility};

/// `#[attach_only]? pub struct Name { Contract: Constructor, ... }`
pub struct SetDecl {
    pub attrs: Vec<Attribute>,
    pub attach_only: bool,
    pub vis: Visibility,
    pub name: Ident,
    pub contracts: Vec<ContractDecl>,
}

pub struct ContractDecl {
    pub name: Ident,
    pub constructor: Type,
}

impl Parse for SetDecl {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attrs = input.call(Attribute::parse_outer)?;
        let before = attrs.len();
        attrs.retain(|attr| !attr.path.is_ident("attach_only"));
        let attach_only = attrs.len() != before;

        let vis = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;

        let content;
        braced!(content in input);
        let contracts: Punctuated<ContractDecl, Token![,]> =
            content.parse_terminated(ContractDecl::parse)?;

        if contracts.is_empty() {
            return Err(syn::Error::new(
                name.span(),
                "a contract set needs at least one contract",
            ));
        }

        Ok(Self {
            attrs,
            attach_only,
            vis,
            name,
            contracts: contracts.into_iter().collect(),
        })
    }
}

impl Parse for ContractDecl {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![:]>()?;
        let constructor = input.parse()?;
        Ok(Self { name, constructor })
    }
}
