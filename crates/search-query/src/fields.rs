//! Field vocabulary: which fields exist and how their values are typed.
//!
//! The registry is passed to the parser rather than held in a global, so
//! tests can build queries over synthetic field sets.

use fnv::FnvHashMap;

use crate::value::ValueKind;

/// The field that holds bare pattern terms.
///
/// Registering it as [`ValueKind::Regexp`] lets the search type decide the
/// pattern kind; any other kind makes every pattern a string.
pub const DEFAULT_FIELD: &str = "";

/// Typing and validation rules for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: ValueKind,
    negatable: bool,
    singular: bool,
    aliases: Vec<String>,
}

impl FieldSpec {
    /// Creates a negatable, repeatable field of the given kind.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            negatable: true,
            singular: false,
            aliases: Vec::new(),
        }
    }

    /// Marks the field as accepting at most one value per query.
    pub fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    /// Marks the field as rejecting `-field:value`.
    pub fn not_negatable(mut self) -> Self {
        self.negatable = false;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_negatable(&self) -> bool {
        self.negatable
    }

    pub fn is_singular(&self) -> bool {
        self.singular
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.as_slice()
    }
}

/// An immutable lookup table of known fields.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    specs: FnvHashMap<String, FieldSpec>,
    aliases: FnvHashMap<String, String>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. A later registration of the same name replaces the earlier one.
    pub fn with(mut self, spec: FieldSpec) -> Self {
        for alias in &spec.aliases {
            self.aliases
                .insert(alias.to_ascii_lowercase(), spec.name.clone());
        }
        self.specs.insert(spec.name.clone(), spec);
        self
    }

    /// The field vocabulary of the code search query language.
    pub fn code_search() -> Self {
        Self::new()
            .with(FieldSpec::new(DEFAULT_FIELD, ValueKind::Regexp))
            .with(FieldSpec::new("repo", ValueKind::Regexp).alias("r"))
            .with(FieldSpec::new("file", ValueKind::Regexp).alias("f"))
            .with(
                FieldSpec::new("lang", ValueKind::String)
                    .alias("l")
                    .alias("language"),
            )
            .with(
                FieldSpec::new("case", ValueKind::Bool)
                    .singular()
                    .not_negatable(),
            )
            .with(
                FieldSpec::new("type", ValueKind::String)
                    .singular()
                    .not_negatable(),
            )
            .with(
                FieldSpec::new("patterntype", ValueKind::String)
                    .singular()
                    .not_negatable(),
            )
            .with(FieldSpec::new("content", ValueKind::String))
            .with(FieldSpec::new("repohasfile", ValueKind::Regexp))
            .with(FieldSpec::new("fork", ValueKind::String).singular())
            .with(FieldSpec::new("archived", ValueKind::String).singular())
            .with(FieldSpec::new("count", ValueKind::String).singular())
            .with(FieldSpec::new("timeout", ValueKind::String).singular())
            .with(FieldSpec::new("author", ValueKind::Regexp))
            .with(FieldSpec::new("message", ValueKind::Regexp).alias("m"))
    }

    /// Resolves a field name or alias.
    ///
    /// Canonical names match exactly; aliases ignore ASCII case.
    pub fn lookup(&self, name: &str) -> Option<&FieldSpec> {
        if let Some(spec) = self.specs.get(name) {
            return Some(spec);
        }
        self.aliases
            .get(&name.to_ascii_lowercase())
            .and_then(|canonical| self.specs.get(canonical))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the registered field names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.specs.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
