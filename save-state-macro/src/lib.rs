use proc_macro::TokenStream;

/// Derive `save_state::InSaveState` for a struct by serializing every field
/// in declaration order. Works for named and tuple structs.
#[proc_macro_derive(InSaveState)]
pub fn derive_in_save_state(input_struct: TokenStream) -> TokenStream {
    let derive_input = match syn::parse::<syn::DeriveInput>(input_struct) {
        Ok(derive_input) => derive_input,
        Err(err) => return err.to_compile_error().into(),
    };
    let (impl_generics, ty_generics, where_clause) = derive_input.generics.split_for_impl();
    let ty_name = &derive_input.ident;
    let fields = match &derive_input.data {
        syn::Data::Struct(field_struct) => field_struct.fields.clone(),
        _ => {
            let text = format!("expected struct, got `{}`", derive_input.ident);
            return syn::parse::Error::new_spanned(&derive_input, text)
                .into_compile_error()
                .into();
        }
    };
    let members: Vec<syn::Member> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(name) => syn::Member::Named(name.clone()),
            None => syn::Member::Unnamed(syn::Index::from(i)),
        })
        .collect();
    quote::quote!(
        impl #impl_generics save_state::InSaveState
                for #ty_name #ty_generics #where_clause {
            fn serialize(&self, state: &mut save_state::SaveStateSerializer) {
                #(self.#members.serialize(state);)*
            }

            fn deserialize(&mut self, state: &mut save_state::SaveStateDeserializer) {
                #(self.#members.deserialize(state);)*
            }
        }
    )
    .into()
}
