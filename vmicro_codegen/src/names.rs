//! Identifier derivation for generated bindings.

use heck::{ToSnakeCase, ToUpperCamelCase};

use crate::error::{CodegenError, Result};

const SERVICE_SUFFIX: &str = "Service";

/// Convert an IDL identifier to PascalCase.
///
/// Each word's first letter is uppercased, the rest is kept as is, so
/// acronyms survive (`HTTPServer`). An `_` followed by a lowercase ASCII
/// letter joins two words and is dropped; any other `_` is kept. Other
/// non-alphanumeric characters separate words and are dropped. A digit ends
/// a word. A leading underscore becomes an `X` so the result still starts
/// with a capital.
///
/// - `"user_service"` -> `"UserService"`
/// - `"foo_Bar"` -> `"Foo_Bar"`, `"v_1"` -> `"V_1"`
/// - `"Greeter Service"` -> `"GreeterService"`
/// - `"foo2bar"` -> `"Foo2Bar"`
/// - `"_internal"` -> `"XInternal"`
pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 1);
    let mut chars = s.chars().peekable();

    if s.starts_with('_') {
        out.push('X');
        chars.next();
    }

    let mut word_start = true;
    while let Some(c) = chars.next() {
        if c == '_' {
            if !chars.peek().is_some_and(char::is_ascii_lowercase) {
                out.push('_');
            }
            word_start = true;
        } else if !c.is_alphanumeric() {
            word_start = true;
        } else if c.is_ascii_digit() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Name prost gives the Rust type generated for a message.
pub fn rust_type_name(message: &str) -> String {
    let mut ident = message.to_upper_camel_case();
    // `Self` cannot be a raw identifier
    if ident == "Self" {
        ident.push('_');
    }
    ident
}

/// Name prost gives the module generated for a package segment or an
/// enclosing message.
pub fn rust_module_name(segment: &str) -> String {
    let mut ident = segment.to_snake_case();
    match ident.as_str() {
        "as" | "break" | "const" | "continue" | "else" | "enum" | "false" | "fn" | "for"
        | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut" | "pub"
        | "ref" | "return" | "static" | "struct" | "trait" | "true" | "type" | "unsafe"
        | "use" | "where" | "while" | "dyn" | "abstract" | "become" | "box" | "do"
        | "final" | "macro" | "override" | "priv" | "typeof" | "unsized" | "virtual"
        | "yield" | "async" | "await" | "try" => ident.insert_str(0, "r#"),
        // Not allowed as raw identifiers
        "self" | "super" | "extern" | "crate" => ident.push('_'),
        _ => {}
    }
    ident
}

/// Lowercase only the first character.
///
/// Not idempotent in general: applying it to its own output is only a no-op
/// when the first character has no further lowercase form.
pub fn unexport(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Parse `name` as a Rust identifier. `Self`, the only keyword PascalCase
/// can produce, becomes `Self_`.
pub(crate) fn ident(name: &str) -> Result<syn::Ident> {
    let escaped = if name == "Self" { "Self_" } else { name };
    syn::parse_str::<syn::Ident>(escaped).map_err(|_| CodegenError::InvalidIdentifier {
        name: name.to_string(),
    })
}

/// Canonical identifiers derived from one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// PascalCase of the raw name
    pub service_ident: String,
    /// Client trait name, `<service_ident>Service` without a doubled suffix
    pub service_alias: String,
    pub callback_ident: String,
    pub handler_ident: String,
    /// Private adapter struct, the alias with its first character lowercased
    pub adapter_ident: String,
    pub constructor_ident: String,
    pub register_ident: String,
    /// Runtime routing prefix, never used as an identifier
    pub routing_namespace: String,
}

impl ResolvedNames {
    pub fn resolve(raw_service_name: &str, package: &str) -> Self {
        let service_ident = pascal_case(raw_service_name);

        let mut service_alias = format!("{service_ident}{SERVICE_SUFFIX}");
        // Applied once, not to a fixpoint
        if service_alias.ends_with("ServiceService") {
            service_alias.truncate(service_alias.len() - SERVICE_SUFFIX.len());
        }

        let routing_namespace = if package.is_empty() {
            raw_service_name.to_lowercase()
        } else {
            package.to_string()
        };

        Self {
            callback_ident: format!("{service_ident}Callback"),
            handler_ident: format!("{service_ident}Handler"),
            adapter_ident: unexport(&service_alias),
            constructor_ident: format!("New{service_alias}"),
            register_ident: format!("Register{service_ident}Handler"),
            service_ident,
            service_alias,
            routing_namespace,
        }
    }

    /// Routing key for a method: PascalCase service, raw method name.
    pub fn routing_key(&self, raw_method_name: &str) -> String {
        format!("{}.{}", self.service_ident, raw_method_name)
    }
}
