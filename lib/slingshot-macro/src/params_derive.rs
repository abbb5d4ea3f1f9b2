//! Params derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Type, parse2};

/// Struct-level options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsStructOptions {
    /// Rename all fields using the given case convention.
    rename_all: Option<RenameRule>,
}

/// Case conversion rules for `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
enum RenameRule {
    /// `lowercase`
    LowerCase,
    /// `UPPERCASE`
    UpperCase,
    /// `camelCase`
    CamelCase,
    /// `PascalCase`
    PascalCase,
    /// `snake_case`
    SnakeCase,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnakeCase,
    /// `kebab-case`
    KebabCase,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebabCase,
}

impl RenameRule {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "lowercase" => Some(Self::LowerCase),
            "UPPERCASE" => Some(Self::UpperCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebabCase),
            _ => None,
        }
    }

    /// Apply the rule to a `snake_case` field name.
    fn apply(self, name: &str) -> String {
        match self {
            Self::LowerCase => name.to_lowercase(),
            Self::UpperCase => name.to_uppercase(),
            Self::CamelCase => to_camel_case(name),
            Self::PascalCase => to_pascal_case(name),
            Self::SnakeCase => name.to_string(),
            Self::ScreamingSnakeCase => name.to_uppercase(),
            Self::KebabCase => name.replace('_', "-"),
            Self::ScreamingKebabCase => name.to_uppercase().replace('_', "-"),
        }
    }
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

fn to_pascal_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collection format for list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CollectionFormat {
    /// One pair per element.
    #[default]
    Multi,
    /// Comma separated.
    Csv,
    /// Space separated.
    Ssv,
    /// Pipe separated.
    Pipes,
}

impl CollectionFormat {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "multi" => Some(Self::Multi),
            "csv" | "comma" => Some(Self::Csv),
            "ssv" | "space" => Some(Self::Ssv),
            "pipes" | "pipe" => Some(Self::Pipes),
            _ => None,
        }
    }

    const fn separator(self) -> Option<&'static str> {
        match self {
            Self::Multi => None,
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Pipes => Some("|"),
        }
    }
}

/// Field options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsFieldOptions {
    /// Never emit this field
    skip: bool,
    /// Omit the field when it's None
    skip_none: bool,
    /// Key override
    rename: Option<String>,
    /// Collection format for list fields
    format: CollectionFormat,
}

/// Expand the `#[derive(Params)]` macro.
pub fn expand_params_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::slingshot::ToParamValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Params derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Params derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        if options.skip_none && !is_option_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "skip_none only applies to Option fields",
            ));
        }

        // Key: explicit rename > rename_all > field name
        let raw_name = field_name.to_string();
        let raw_name = raw_name.strip_prefix("r#").unwrap_or(&raw_name);
        let key = match (&options.rename, struct_options.rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(raw_name),
            (None, None) => raw_name.to_string(),
        };

        field_handlers.push(generate_field_handler(field_name, &key, &options));
    }

    Ok(quote! {
        impl #impl_generics ::slingshot::ToParams for #name #ty_generics #where_clause {
            fn to_params(&self) -> ::std::vec::Vec<(::std::string::String, ::slingshot::ParamValue)> {
                let mut params = ::std::vec::Vec::new();
                #(#field_handlers)*
                params
            }
        }
    })
}

fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsStructOptions> {
    let mut options = ParamsStructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        format!(
                            "unknown rename_all value: \"{}\". Expected one of: \
                             lowercase, UPPERCASE, camelCase, PascalCase, \
                             snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                            value.value()
                        ),
                    )
                })?;
                options.rename_all = Some(rule);
                Ok(())
            } else {
                Err(meta.error("unknown params attribute, expected `rename_all`"))
            }
        })?;
    }

    Ok(options)
}

fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsFieldOptions> {
    let mut options = ParamsFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("skip_none") {
                options.skip_none = true;
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("format") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.format = CollectionFormat::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        "unknown format, expected one of: multi, csv, ssv, pipes",
                    )
                })?;
            } else {
                return Err(meta.error(
                    "unknown params attribute, expected one of: skip, skip_none, rename, format",
                ));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

fn generate_field_handler(
    field_name: &syn::Ident,
    key: &str,
    options: &ParamsFieldOptions,
) -> TokenStream {
    let join = options.format.separator().map(|separator| {
        quote! { let value = value.joined(#separator); }
    });

    if options.skip_none {
        quote! {
            if let ::std::option::Option::Some(value) = &self.#field_name {
                let value = ::slingshot::ToParamValue::to_param_value(value);
                #join
                params.push((::std::string::String::from(#key), value));
            }
        }
    } else {
        quote! {
            {
                let value = ::slingshot::ToParamValue::to_param_value(&self.#field_name);
                #join
                params.push((::std::string::String::from(#key), value));
            }
        }
    }
}

/// Check if a type is `Option<T>`.
fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    /// Expanded code with whitespace removed.
    fn expand(input: TokenStream) -> syn::Result<String> {
        expand_params_derive(input).map(|tokens| tokens.to_string().replace(' ', ""))
    }

    #[test]
    fn rename_rules() {
        let name = "sort_order_by";
        check!(RenameRule::LowerCase.apply(name) == "sort_order_by");
        check!(RenameRule::UpperCase.apply(name) == "SORT_ORDER_BY");
        check!(RenameRule::CamelCase.apply(name) == "sortOrderBy");
        check!(RenameRule::PascalCase.apply(name) == "SortOrderBy");
        check!(RenameRule::SnakeCase.apply(name) == "sort_order_by");
        check!(RenameRule::ScreamingSnakeCase.apply(name) == "SORT_ORDER_BY");
        check!(RenameRule::KebabCase.apply(name) == "sort-order-by");
        check!(RenameRule::ScreamingKebabCase.apply(name) == "SORT-ORDER-BY");
        check!(RenameRule::parse("Train-Case").is_none());
    }

    #[test]
    fn collection_formats() {
        check!(CollectionFormat::parse("csv") == Some(CollectionFormat::Csv));
        check!(CollectionFormat::parse("pipe") == Some(CollectionFormat::Pipes));
        check!(CollectionFormat::parse("tsv").is_none());
        check!(CollectionFormat::Multi.separator().is_none());
        check!(CollectionFormat::Ssv.separator() == Some(" "));
    }

    #[test]
    fn expands_keys_in_field_order() {
        let output = expand(quote! {
            #[params(rename_all = "camelCase")]
            struct Filter {
                sort_order: String,
                #[params(rename = "per_page")]
                limit: u32,
                #[params(skip)]
                cache_key: String,
            }
        })
        .expect("expand");

        check!(output.contains("impl::slingshot::ToParamsforFilter"));
        let sort = output.find("\"sortOrder\"").expect("sortOrder key");
        let per_page = output.find("\"per_page\"").expect("per_page key");
        check!(sort < per_page);
        check!(!output.contains("cache_key"));
    }

    #[test]
    fn skip_none_matches_some() {
        let output = expand(quote! {
            struct Filter {
                #[params(skip_none)]
                since: Option<String>,
            }
        })
        .expect("expand");
        check!(output.contains("Some(value)=&self.since"));
    }

    #[test]
    fn format_joins_values() {
        let output = expand(quote! {
            struct Filter {
                #[params(format = "pipes")]
                labels: Vec<String>,
            }
        })
        .expect("expand");
        check!(output.contains("joined(\"|\")"));
    }

    #[test]
    fn rejects_unsupported_shapes() {
        let err = expand(quote! { struct Pair(u8, u8); }).expect_err("tuple struct");
        check!(err.to_string().contains("named fields"));

        let err = expand(quote! { enum Choice { A } }).expect_err("enum");
        check!(err.to_string().contains("only supports structs"));
    }

    #[test]
    fn rejects_unknown_attributes() {
        let err = expand(quote! {
            struct Filter {
                #[params(flatten)]
                inner: Inner,
            }
        })
        .expect_err("unknown attribute");
        check!(err.to_string().contains("unknown params attribute"));

        let err = expand(quote! {
            #[params(rename_all = "Train-Case")]
            struct Filter { a: u8 }
        })
        .expect_err("unknown rule");
        check!(err.to_string().contains("unknown rename_all value"));

        let err = expand(quote! {
            struct Filter {
                #[params(format = "tsv")]
                tags: Vec<String>,
            }
        })
        .expect_err("unknown format");
        check!(err.to_string().contains("unknown format"));
    }

    #[test]
    fn skip_none_requires_option() {
        let err = expand(quote! {
            struct Filter {
                #[params(skip_none)]
                page: u32,
            }
        })
        .expect_err("not an option");
        check!(err.to_string().contains("skip_none"));
    }
}
