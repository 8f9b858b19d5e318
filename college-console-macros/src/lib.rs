//! Procedural macros for the college console

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Enable automatic category inference from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category, used instead of the inferred one
    #[darling(default)]
    category: Option<String>,
}

// Verbs that END the subject part of a variant name. Nouns like "Form" or
// "Field" must not appear here.
const ACTION_VERBS: &[&str] = &[
    // Lifecycle
    "Open", "Close", "Submit", "Confirm", "Cancel", "Dismiss", // Navigation
    "Next", "Prev", "Select", "Enter", "Exit", // CRUD
    "Add", "Edit", "Remove", "Clear", "Update", "Set", "Fetch", "Load", "Save", "Delete", "Create",
    // Focus and movement
    "Focus", "Toggle", "Move", "Reset", "Resize",
];

/// Marker for async result variants (`DataDidLoad`, `RecordDidError`)
const RESULT_MARKER: &str = "Did";

/// Split a PascalCase identifier into its words
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn to_snake_case(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Infer a category from a variant name.
///
/// The category is the run of words before the first verb or the `Did`
/// result marker: `FormFieldSet` -> `form_field`, `RecordDidSave` -> `record`.
/// Names that start with a verb, or contain none, are uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 || ACTION_VERBS.contains(&parts[0].as_str()) {
        return None;
    }

    let prefix_end = parts
        .iter()
        .skip(1)
        .position(|p| p == RESULT_MARKER || ACTION_VERBS.contains(&p.as_str()))
        .map(|i| i + 1)?;

    Some(to_snake_case(&parts[..prefix_end]))
}

/// Derive macro for the console `Action` trait
///
/// Generates `name()` returning the variant name. With
/// `#[action(infer_categories)]` it also generates an inherent `category()`
/// and an `ActionCategory` impl, grouping intents and their `Did*` results
/// under one name (`DataFetch` and `DataDidLoad` are both `"data"`).
///
/// Generated paths go through `::college_console`, so the deriving crate must
/// be `college_console` itself (it declares `extern crate self`) or depend
/// on it.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     DataFetch,
///     DataDidLoad(Vec<Student>),
///     FormSubmit,
///     #[action(category = "ui")]
///     UiTerminalResize(u16, u16),
///     Quit, // uncategorized
/// }
///
/// assert_eq!(Action::FormSubmit.name(), "FormSubmit");
/// assert_eq!(Action::DataFetch.category(), Some("data"));
/// assert_eq!(Action::UiTerminalResize(80, 24).category(), Some("ui"));
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let mut expanded = quote! {
        impl ::college_console::dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        let category_arms = variants.iter().map(|v| {
            let variant = &v.ident;
            let category = v
                .category
                .clone()
                .or_else(|| infer_category(&variant.to_string()));
            let category_expr = match category {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            quote! { #name::#variant { .. } => #category_expr }
        });

        expanded = quote! {
            #expanded

            impl #name {
                /// Get the action's category (if categorized)
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }
            }

            impl ::college_console::dispatch::ActionCategory for #name {
                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}
