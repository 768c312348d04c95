use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Lit, Token};

/// Parsed attributes from #[vmicro_service(name = "...", package = "...", runtime = "...")]
#[derive(Debug, Default)]
pub struct ServiceAttr {
    pub name: Option<String>,
    pub package: Option<String>,
    pub runtime: Option<String>,
}

impl Parse for ServiceAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attr = ServiceAttr::default();

        // Parse key = value pairs
        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value = parse_str_lit(input, &key)?;

            let slot = if key == "name" {
                &mut attr.name
            } else if key == "package" {
                &mut attr.package
            } else if key == "runtime" {
                &mut attr.runtime
            } else {
                return Err(syn::Error::new_spanned(
                    key,
                    "Unknown attribute, expected one of: name, package, runtime",
                ));
            };
            if slot.replace(value).is_some() {
                return Err(syn::Error::new_spanned(key, "Duplicate attribute"));
            }

            // Allow trailing comma
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attr)
    }
}

/// Method attribute: #[method(name = "...")]
#[derive(Debug, Clone)]
pub struct MethodAttr {
    pub name: String,
}

impl Parse for MethodAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value = parse_str_lit(input, &key)?;

            if key == "name" {
                name = Some(value);
            } else {
                return Err(syn::Error::new_spanned(key, "Expected 'name'"));
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        name.ok_or_else(|| input.error("Missing 'name' attribute"))
            .map(|name| MethodAttr { name })
    }
}

/// Find and parse a #[method(...)] attribute
pub fn parse_method_attr(attrs: &[Attribute]) -> syn::Result<Option<MethodAttr>> {
    for attr in attrs {
        if attr.path().is_ident("method") {
            return attr.parse_args::<MethodAttr>().map(Some);
        }
    }
    Ok(None)
}

/// Doc comment lines, without the leading `///`.
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }),
                ..
            }) => Some(s.value()),
            _ => None,
        })
        .collect()
}

fn parse_str_lit(input: ParseStream, key: &syn::Ident) -> syn::Result<String> {
    match input.parse::<Lit>()? {
        Lit::Str(s) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("Expected string literal for {key}"),
        )),
    }
}
