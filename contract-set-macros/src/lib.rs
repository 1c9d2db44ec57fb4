mod input;
mod set_gen;

use crate::input::SetDecl;
use crate::set_gen::set_from_decl;
use syn::parse_macro_input;

#[macro_use]
extern crate quote;

/// Generates a struct holding one builder per listed contract. Each contract
/// name is paired with its constructor type and becomes a snake_case field.
///
/// The struct gets `build`, `connect(signer)`, `signer()` and `NAMES`. By
/// default the fields are `DeployOrAttach` builders and `build` takes a
/// `SignerSource` after the constructors. With `#[attach_only]` they are
/// `AttachOnly` builders and `build` takes only the constructors.
///
/// ```ignore
/// contract_set! {
///     pub struct Deployments {
///         Token: Artifact<Http, (String, u8)>,
///         Vault: Artifact<Http, (Address,)>,
///     }
/// }
///
/// let deployments = Deployments::build(token, vault, context.signer_source());
/// let token = deployments.token.deploy(("MyToken".to_owned(), 18)).await?;
/// ```
#[proc_macro]
pub fn contract_set(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let decl = parse_macro_input!(input as SetDecl);

    let tokens = match set_from_decl(&decl) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    };

    tokens.into()
}
