//! Documented instrument entries and their key metadata

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Marker used in display names that are resolved at runtime
pub const DYNAMIC_NAME_MARKER: &str = "%s";

/// Raised when an entry is built without one of its required fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("{kind} identifier must not be empty")]
    MissingIdentifier { kind: InstrumentKind },
    #[error("{kind} name must not be empty (declared as {identifier})")]
    MissingName {
        kind: InstrumentKind,
        identifier: String,
    },
    #[error("{kind} description must not be empty (declared as {identifier})")]
    MissingDescription {
        kind: InstrumentKind,
        identifier: String,
    },
}

/// The kind of instrument a run documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Span,
    Meter,
}

impl InstrumentKind {
    /// Struct name whose literals mark a documented declaration
    pub fn marker_type(&self) -> &'static str {
        match self {
            InstrumentKind::Span => "SpanDocumentation",
            InstrumentKind::Meter => "MeterDocumentation",
        }
    }

    /// Word appended to section titles
    pub fn title_word(&self) -> &'static str {
        match self {
            InstrumentKind::Span => "Span",
            InstrumentKind::Meter => "Metric",
        }
    }

    /// Name of the generated document inside the output directory
    pub fn output_file_name(&self) -> &'static str {
        match self {
            InstrumentKind::Span => "_spans.adoc",
            InstrumentKind::Meter => "_metrics.adoc",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Span => write!(f, "span"),
            InstrumentKind::Meter => write!(f, "metric"),
        }
    }
}

/// A documented key (tag key or event name) with its one-line description.
///
/// Equality and ordering only consider the key name.
#[derive(Debug, Clone)]
pub struct KeyValue {
    pub name: String,
    pub description: String,
}

impl KeyValue {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for KeyValue {}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for KeyValue {
    /// One AsciiDoc table row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|`{}`|{}", self.name, self.description)
    }
}

/// Ordered, name-unique group of keys
pub type KeyGroup = BTreeSet<KeyValue>;

/// Tag keys of an entry, laid out per instrument kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKeys {
    /// Span tags: low and high cardinality keys combined, plus additional keys
    Span {
        tag_keys: KeyGroup,
        additional_tag_keys: KeyGroup,
    },
    Meter {
        low_cardinality: KeyGroup,
        high_cardinality: KeyGroup,
    },
}

impl TagKeys {
    pub fn span(
        low_cardinality: KeyGroup,
        high_cardinality: KeyGroup,
        additional_tag_keys: KeyGroup,
    ) -> Self {
        let mut tag_keys = low_cardinality;
        tag_keys.extend(high_cardinality);
        TagKeys::Span {
            tag_keys,
            additional_tag_keys,
        }
    }

    pub fn meter(low_cardinality: KeyGroup, high_cardinality: KeyGroup) -> Self {
        TagKeys::Meter {
            low_cardinality,
            high_cardinality,
        }
    }

    /// Groups in rendering order, paired with their table captions
    pub fn groups(&self) -> [(&'static str, &KeyGroup); 2] {
        match self {
            TagKeys::Span {
                tag_keys,
                additional_tag_keys,
            } => [
                ("Tag Keys", tag_keys),
                ("Additional Tag Keys", additional_tag_keys),
            ],
            TagKeys::Meter {
                low_cardinality,
                high_cardinality,
            } => [
                ("Low cardinality Keys", low_cardinality),
                ("High cardinality Keys", high_cardinality),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|(_, group)| group.is_empty())
    }
}

/// Reference to the entry another one supersedes as default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultOverride {
    pub enclosing_type: String,
    pub identifier: String,
}

/// Meter-only metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterDetails {
    pub meter_type: Option<String>,
    pub base_unit: Option<String>,
}

/// Structured documentation of one telemetry instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: InstrumentKind,
    identifier: String,
    display_name: String,
    enclosing_type: String,
    description: String,
    prefix: Option<String>,
    tag_keys: TagKeys,
    events: KeyGroup,
    overrides_default_from: Option<DefaultOverride>,
    meter: MeterDetails,
}

impl Entry {
    pub fn builder(
        kind: InstrumentKind,
        identifier: impl Into<String>,
        enclosing_type: impl Into<String>,
    ) -> EntryBuilder {
        EntryBuilder::new(kind, identifier.into(), enclosing_type.into())
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn enclosing_type(&self) -> &str {
        &self.enclosing_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn tag_keys(&self) -> &TagKeys {
        &self.tag_keys
    }

    pub fn events(&self) -> &KeyGroup {
        &self.events
    }

    pub fn overrides_default_from(&self) -> Option<&DefaultOverride> {
        self.overrides_default_from.as_ref()
    }

    pub fn meter(&self) -> &MeterDetails {
        &self.meter
    }

    pub fn has_dynamic_name(&self) -> bool {
        self.display_name.contains(DYNAMIC_NAME_MARKER)
    }

    /// Tag keys and events whose names lack the declared prefix
    pub fn unprefixed_keys(&self) -> Vec<&KeyValue> {
        let Some(prefix) = self.prefix() else {
            return Vec::new();
        };
        self.tag_keys
            .groups()
            .into_iter()
            .flat_map(|(_, group)| group.iter())
            .chain(self.events.iter())
            .filter(|key| !key.name.starts_with(prefix))
            .collect()
    }
}

/// Collects the optional parts of an [`Entry`] before the required fields are checked
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    kind: InstrumentKind,
    identifier: String,
    enclosing_type: String,
    display_name: String,
    description: String,
    prefix: Option<String>,
    low_cardinality: KeyGroup,
    high_cardinality: KeyGroup,
    additional: KeyGroup,
    events: KeyGroup,
    overrides_default_from: Option<DefaultOverride>,
    meter: MeterDetails,
}

impl EntryBuilder {
    fn new(kind: InstrumentKind, identifier: String, enclosing_type: String) -> Self {
        Self {
            kind,
            identifier,
            enclosing_type,
            display_name: String::new(),
            description: String::new(),
            prefix: None,
            low_cardinality: KeyGroup::new(),
            high_cardinality: KeyGroup::new(),
            additional: KeyGroup::new(),
            events: KeyGroup::new(),
            overrides_default_from: None,
            meter: MeterDetails::default(),
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// An empty prefix is treated as no prefix
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn low_cardinality_keys(mut self, keys: impl IntoIterator<Item = KeyValue>) -> Self {
        self.low_cardinality.extend(keys);
        self
    }

    pub fn high_cardinality_keys(mut self, keys: impl IntoIterator<Item = KeyValue>) -> Self {
        self.high_cardinality.extend(keys);
        self
    }

    /// Ignored for meters
    pub fn additional_keys(mut self, keys: impl IntoIterator<Item = KeyValue>) -> Self {
        self.additional.extend(keys);
        self
    }

    /// Ignored for meters
    pub fn events(mut self, events: impl IntoIterator<Item = KeyValue>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn overrides_default_from(mut self, overrides: Option<DefaultOverride>) -> Self {
        self.overrides_default_from = overrides;
        self
    }

    /// Ignored for spans
    pub fn meter_details(mut self, meter: MeterDetails) -> Self {
        self.meter = meter;
        self
    }

    pub fn build(self) -> Result<Entry, EntryError> {
        let kind = self.kind;
        if self.identifier.trim().is_empty() {
            return Err(EntryError::MissingIdentifier { kind });
        }
        if self.display_name.trim().is_empty() {
            return Err(EntryError::MissingName {
                kind,
                identifier: self.identifier,
            });
        }
        if self.description.trim().is_empty() {
            return Err(EntryError::MissingDescription {
                kind,
                identifier: self.identifier,
            });
        }

        let (tag_keys, events, meter) = match kind {
            InstrumentKind::Span => (
                TagKeys::span(self.low_cardinality, self.high_cardinality, self.additional),
                self.events,
                MeterDetails::default(),
            ),
            InstrumentKind::Meter => (
                TagKeys::meter(self.low_cardinality, self.high_cardinality),
                KeyGroup::new(),
                self.meter,
            ),
        };

        Ok(Entry {
            kind,
            identifier: self.identifier,
            display_name: self.display_name,
            enclosing_type: self.enclosing_type,
            description: self.description,
            prefix: self.prefix,
            tag_keys,
            events,
            overrides_default_from: self.overrides_default_from,
            meter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(identifier: &str) -> EntryBuilder {
        Entry::builder(InstrumentKind::Span, identifier, "app::Spans")
            .display_name("request")
            .description("Handles a request")
    }

    #[test]
    fn test_key_value_equality_uses_name_only() {
        let a = KeyValue::new("http.method", "Method");
        let b = KeyValue::new("http.method", "Something else");
        assert_eq!(a, b);
        assert!(KeyValue::new("a", "z") < KeyValue::new("b", "a"));
    }

    #[test]
    fn test_key_value_row() {
        let key = KeyValue::new("http.method", "HTTP method");
        assert_eq!(key.to_string(), "|`http.method`|HTTP method");
    }

    #[test]
    fn test_build_requires_name() {
        let err = Entry::builder(InstrumentKind::Span, "FOO", "app::Spans")
            .description("desc")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            EntryError::MissingName {
                kind: InstrumentKind::Span,
                identifier: "FOO".to_string()
            }
        );
    }

    #[test]
    fn test_build_requires_description() {
        let err = Entry::builder(InstrumentKind::Meter, "FOO", "app::Meters")
            .display_name("foo")
            .description("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, EntryError::MissingDescription { .. }));
        assert!(err.to_string().contains("metric description"));
    }

    #[test]
    fn test_build_requires_identifier() {
        let err = Entry::builder(InstrumentKind::Span, "", "app::Spans")
            .display_name("foo")
            .description("desc")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            EntryError::MissingIdentifier {
                kind: InstrumentKind::Span
            }
        );
    }

    #[test]
    fn test_span_combines_low_and_high_cardinality_keys() {
        let entry = span("FOO")
            .low_cardinality_keys([KeyValue::new("b", "B")])
            .high_cardinality_keys([KeyValue::new("a", "A"), KeyValue::new("b", "dup")])
            .additional_keys([KeyValue::new("c", "C")])
            .build()
            .unwrap();

        let [(caption, tags), (additional_caption, additional)] = entry.tag_keys().groups();
        assert_eq!(caption, "Tag Keys");
        assert_eq!(additional_caption, "Additional Tag Keys");
        let names: Vec<&str> = tags.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(additional.len(), 1);
    }

    #[test]
    fn test_meter_drops_events() {
        let entry = Entry::builder(InstrumentKind::Meter, "FOO", "app::Meters")
            .display_name("foo")
            .description("desc")
            .events([KeyValue::new("e", "E")])
            .build()
            .unwrap();
        assert!(entry.events().is_empty());
        assert!(entry.tag_keys().is_empty());
    }

    #[test]
    fn test_dynamic_name() {
        let entry = span("FOO").display_name("request %s").build().unwrap();
        assert!(entry.has_dynamic_name());
        assert!(!span("FOO").build().unwrap().has_dynamic_name());
    }

    #[test]
    fn test_empty_prefix_is_none() {
        let entry = span("FOO").prefix(Some(String::new())).build().unwrap();
        assert_eq!(entry.prefix(), None);
    }

    #[test]
    fn test_unprefixed_keys() {
        let entry = span("FOO")
            .prefix(Some("http.".to_string()))
            .low_cardinality_keys([
                KeyValue::new("http.method", "Method"),
                KeyValue::new("status", "Status"),
            ])
            .events([KeyValue::new("sent", "Sent")])
            .build()
            .unwrap();

        let names: Vec<&str> = entry
            .unprefixed_keys()
            .iter()
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(names, vec!["status", "sent"]);
    }

    #[test]
    fn test_full_equality_covers_every_field() {
        let a = span("FOO").build().unwrap();
        let b = span("FOO").description("Other").build().unwrap();
        assert_ne!(a, b);
        assert_eq!(a, span("FOO").build().unwrap());
    }
}
