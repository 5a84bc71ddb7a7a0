mod attribute;

use proc_macro::TokenStream;

/// Implements `sable_ecs::attributes::Attribute` for a plain-data struct.
///
/// The type must also implement `bytemuck::Pod`.
#[proc_macro_derive(Attribute)]
pub fn derive_attribute(input: TokenStream) -> TokenStream {
    match syn::parse(input) {
        Ok(ast) => attribute::impl_attribute(&ast),
        Err(err) => err.to_compile_error().into(),
    }
}
