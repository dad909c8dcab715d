use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// Generated code for one identifier, split by where it has to be placed.
#[derive(Clone, Default)]
pub struct GeneratedFunctions {
    /// Functions and constants that belong in the identifier's inherent impl.
    pub id_fns: TokenStream,
    /// Free standing items: trait impls, the kind enum, the mirror.
    pub items: TokenStream,
}

impl GeneratedFunctions {
    pub fn append_id_fns(&mut self, quote_info: &TokenStream) {
        let id_fns = &mut self.id_fns;
        *id_fns = quote! {
            #id_fns
            #quote_info
        };
    }

    pub fn append_items(&mut self, quote_info: &TokenStream) {
        let items = &mut self.items;
        *items = quote! {
            #items
            #quote_info
        };
    }

    pub fn merge(&mut self, other: &Self) {
        self.append_id_fns(&other.id_fns);
        self.append_items(&other.items);
    }

    /// Wraps the inherent functions into an impl for `name`.
    pub fn finish(self, name: &Ident) -> TokenStream {
        let id_fns = self.id_fns;
        let items = self.items;
        quote! {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::cast_sign_loss,
                clippy::cast_lossless,
                clippy::unnecessary_cast,
                clippy::must_use_candidate,
            )]
            impl #name {
                #id_fns
            }
            #items
        }
    }
}
