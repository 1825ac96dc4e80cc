//! Reading literal values out of declaration expressions

use crate::model::{DefaultOverride, KeyValue};
use syn::punctuated::Punctuated;
use syn::{Expr, ExprStruct, Lit, Member, Token};

/// Marker for a field whose value is not a literal the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotLiteral;

type LiteralResult<T> = Result<T, NotLiteral>;

/// Strips parentheses and invisible groups
fn peel(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(inner) => peel(&inner.expr),
        Expr::Group(inner) => peel(&inner.expr),
        other => other,
    }
}

/// Looks up a named field of a struct literal
pub fn field<'a>(literal: &'a ExprStruct, name: &str) -> Option<&'a Expr> {
    literal.fields.iter().find_map(|field| match &field.member {
        Member::Named(ident) if ident == name => Some(&field.expr),
        _ => None,
    })
}

pub fn string(expr: &Expr) -> LiteralResult<String> {
    match peel(expr) {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Ok(s.value()),
            _ => Err(NotLiteral),
        },
        _ => Err(NotLiteral),
    }
}

fn is_none(expr: &Expr) -> bool {
    matches!(peel(expr), Expr::Path(path) if path.path.is_ident("None"))
}

/// The argument of a `Some(..)` call, if `expr` is one
fn some_argument(expr: &Expr) -> Option<&Expr> {
    match peel(expr) {
        Expr::Call(call) if call.args.len() == 1 => match peel(&call.func) {
            Expr::Path(path) if path.path.is_ident("Some") => call.args.first(),
            _ => None,
        },
        _ => None,
    }
}

/// Reads `None`, `Some(value)` or a bare `value`
fn optional<T>(
    expr: &Expr,
    read: impl Fn(&Expr) -> LiteralResult<T>,
) -> LiteralResult<Option<T>> {
    if is_none(expr) {
        return Ok(None);
    }
    match some_argument(expr) {
        Some(inner) => read(inner).map(Some),
        None => read(expr).map(Some),
    }
}

pub fn optional_string(expr: &Expr) -> LiteralResult<Option<String>> {
    optional(expr, string)
}

/// Elements of `[..]`, `&[..]` or `vec![..]`
fn elements(expr: &Expr) -> LiteralResult<Vec<Expr>> {
    match peel(expr) {
        Expr::Reference(reference) => elements(&reference.expr),
        Expr::Array(array) => Ok(array.elems.iter().cloned().collect()),
        Expr::Macro(mac) if mac.mac.path.is_ident("vec") => mac
            .mac
            .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
            .map(|items| items.into_iter().collect())
            .map_err(|_| NotLiteral),
        _ => Err(NotLiteral),
    }
}

fn string_pair(expr: &Expr) -> LiteralResult<(String, String)> {
    match peel(expr) {
        Expr::Tuple(tuple) if tuple.elems.len() == 2 => {
            Ok((string(&tuple.elems[0])?, string(&tuple.elems[1])?))
        }
        _ => Err(NotLiteral),
    }
}

/// A key is either `Key { name: "..", description: ".." }` or `("..", "..")`
fn key_value(expr: &Expr) -> LiteralResult<KeyValue> {
    match peel(expr) {
        Expr::Struct(literal) => {
            let name = field(literal, "name").ok_or(NotLiteral)?;
            let description = match field(literal, "description") {
                Some(description) => string(description)?,
                None => String::new(),
            };
            Ok(KeyValue::new(string(name)?, description))
        }
        other => string_pair(other).map(|(name, description)| KeyValue::new(name, description)),
    }
}

pub fn key_list(expr: &Expr) -> LiteralResult<Vec<KeyValue>> {
    elements(expr)?.iter().map(key_value).collect()
}

pub fn default_override(expr: &Expr) -> LiteralResult<Option<DefaultOverride>> {
    optional(expr, |inner| {
        string_pair(inner).map(|(enclosing_type, identifier)| DefaultOverride {
            enclosing_type,
            identifier,
        })
    })
}

/// A meter type is a string or an enum path such as `MeterType::LongTaskTimer`
pub fn meter_type(expr: &Expr) -> LiteralResult<Option<String>> {
    optional(expr, |inner| match peel(inner) {
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| to_snake_case(&segment.ident.to_string()))
            .ok_or(NotLiteral),
        other => string(other),
    })
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
