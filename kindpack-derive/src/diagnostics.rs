//! Non fatal findings. Proc macros on stable can not emit warnings directly, so each warning becomes a
//! use of a deprecated item spanned at the offending kind, which rustc reports as a warning carrying
//! the message.
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote_spanned};

#[derive(Debug, Clone)]
pub struct Warning {
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.warnings.push(Warning {
            span,
            message: message.into(),
        });
    }

    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(|w| w.message.as_str())
    }

    pub fn to_token_stream(&self) -> TokenStream {
        let mut out = TokenStream::new();
        for (i, warning) in self.warnings.iter().enumerate() {
            let ident = format_ident!("kindpack_warning_{}", i, span = warning.span);
            let message = &warning.message;
            out.extend(quote_spanned! {warning.span=>
                const _: () = {
                    #[deprecated(note = #message)]
                    #[allow(non_upper_case_globals)]
                    const #ident: () = ();
                    #ident
                };
            });
        }
        out
    }
}
