//! Static extraction of documented instrument declarations from Rust sources
//!
//! A declaration is documented when a `const` or `static` item, free or
//! associated with an `impl` block, is initialised with a struct literal of the
//! run's marker type:
//!
//! ```ignore
//! impl HttpSpans {
//!     pub const HTTP_CLIENT: SpanDocumentation = SpanDocumentation {
//!         name: "http %s",
//!         description: "Outbound HTTP request",
//!         prefix: Some("http."),
//!         low_cardinality_keys: &[
//!             KeyDocumentation { name: "http.method", description: "HTTP method" },
//!         ],
//!         high_cardinality_keys: &[],
//!         additional_keys: &[],
//!         events: &[("http.sent", "Request written to the wire")],
//!         overrides_default_from: None,
//!     };
//! }
//! ```
//!
//! Nothing is compiled or resolved; only the literal syntax is read.

pub mod literal;
pub mod module_path;

use crate::model::{Entry, EntryError, InstrumentKind, MeterDetails};
use literal::NotLiteral;
use module_path::ModulePath;
use std::path::Path;
use syn::{Expr, ExprStruct, Ident, ImplItem, Item, Type};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error(transparent)]
    InvalidEntry(#[from] EntryError),
    #[error("{identifier}: field `{field}` must be a literal value")]
    NonLiteralField {
        identifier: String,
        field: &'static str,
    },
}

/// Does `expr` have the shape of a documented declaration for `kind`?
pub fn is_documented(expr: &Expr, kind: InstrumentKind) -> Option<&ExprStruct> {
    match expr {
        Expr::Struct(literal) => literal
            .path
            .segments
            .last()
            .filter(|segment| segment.ident == kind.marker_type())
            .map(|_| literal),
        Expr::Paren(inner) => is_documented(&inner.expr, kind),
        Expr::Group(inner) => is_documented(&inner.expr, kind),
        _ => None,
    }
}

/// Turns one source file into the entries it declares
#[derive(Debug, Clone, Copy)]
pub struct DeclarationExtractor {
    kind: InstrumentKind,
}

impl DeclarationExtractor {
    pub fn new(kind: InstrumentKind) -> Self {
        Self { kind }
    }

    /// Extracts entries from `source`.
    ///
    /// `relative_path` is the file's location under the project root and only
    /// feeds the enclosing type names. Sources that do not parse yield no entries.
    pub fn extract(
        &self,
        source: &str,
        relative_path: &Path,
    ) -> Result<Vec<Entry>, ExtractError> {
        let file = match syn::parse_file(source) {
            Ok(file) => file,
            Err(err) => {
                debug!(
                    path = %relative_path.display(),
                    error = %err,
                    "Skipping file that does not parse"
                );
                return Ok(Vec::new());
            }
        };

        let mut entries = Vec::new();
        let module = ModulePath::from_relative_path(relative_path);
        self.visit_items(&file.items, &module, &mut entries)?;

        trace!(
            path = %relative_path.display(),
            entries = entries.len(),
            "Extracted declarations"
        );
        Ok(entries)
    }

    fn visit_items(
        &self,
        items: &[Item],
        module: &ModulePath,
        entries: &mut Vec<Entry>,
    ) -> Result<(), ExtractError> {
        for item in items {
            match item {
                Item::Const(item) => {
                    self.visit_declaration(&item.ident, &item.expr, module, entries)?
                }
                Item::Static(item) => {
                    self.visit_declaration(&item.ident, &item.expr, module, entries)?
                }
                Item::Impl(item) => {
                    let Some(type_name) = self_type_name(&item.self_ty) else {
                        continue;
                    };
                    let enclosing = module.child(type_name);
                    for impl_item in &item.items {
                        if let ImplItem::Const(constant) = impl_item {
                            self.visit_declaration(
                                &constant.ident,
                                &constant.expr,
                                &enclosing,
                                entries,
                            )?;
                        }
                    }
                }
                Item::Mod(item) => {
                    if let Some((_, nested)) = &item.content {
                        self.visit_items(nested, &module.child(item.ident.to_string()), entries)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn visit_declaration(
        &self,
        ident: &Ident,
        expr: &Expr,
        enclosing: &ModulePath,
        entries: &mut Vec<Entry>,
    ) -> Result<(), ExtractError> {
        if let Some(literal) = is_documented(expr, self.kind) {
            let entry = self.extract_entry(&ident.to_string(), literal, &enclosing.to_string())?;
            debug!(
                identifier = entry.identifier(),
                enclosing_type = entry.enclosing_type(),
                "Found documented declaration"
            );
            entries.push(entry);
        }
        Ok(())
    }

    fn extract_entry(
        &self,
        identifier: &str,
        literal: &ExprStruct,
        enclosing_type: &str,
    ) -> Result<Entry, ExtractError> {
        let read = FieldReader {
            identifier,
            literal,
        };

        let mut builder = Entry::builder(self.kind, identifier, enclosing_type)
            .display_name(read.field("name", literal::string)?.unwrap_or_default())
            .description(read.field("description", literal::string)?.unwrap_or_default())
            .prefix(read.field("prefix", literal::optional_string)?.flatten())
            .low_cardinality_keys(
                read.field("low_cardinality_keys", literal::key_list)?
                    .unwrap_or_default(),
            )
            .high_cardinality_keys(
                read.field("high_cardinality_keys", literal::key_list)?
                    .unwrap_or_default(),
            )
            .overrides_default_from(
                read.field("overrides_default_from", literal::default_override)?
                    .flatten(),
            );

        builder = match self.kind {
            InstrumentKind::Span => builder
                .additional_keys(
                    read.field("additional_keys", literal::key_list)?
                        .unwrap_or_default(),
                )
                .events(read.field("events", literal::key_list)?.unwrap_or_default()),
            InstrumentKind::Meter => builder.meter_details(MeterDetails {
                meter_type: read.field("meter_type", literal::meter_type)?.flatten(),
                base_unit: read.field("base_unit", literal::optional_string)?.flatten(),
            }),
        };

        Ok(builder.build()?)
    }
}

struct FieldReader<'a> {
    identifier: &'a str,
    literal: &'a ExprStruct,
}

impl FieldReader<'_> {
    /// `Ok(None)` when the field is absent
    fn field<T>(
        &self,
        name: &'static str,
        read: impl Fn(&Expr) -> Result<T, NotLiteral>,
    ) -> Result<Option<T>, ExtractError> {
        literal::field(self.literal, name)
            .map(|expr| {
                read(expr).map_err(|NotLiteral| ExtractError::NonLiteralField {
                    identifier: self.identifier.to_string(),
                    field: name,
                })
            })
            .transpose()
    }
}

fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Type::Group(group) => self_type_name(&group.elem),
        Type::Paren(paren) => self_type_name(&paren.elem),
        _ => None,
    }
}
