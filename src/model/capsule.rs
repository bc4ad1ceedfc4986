//! The capsule metadata record
//!
//! A capsule is a named, versioned description of a packaged collection of
//! Obsidian content. Its mapping form is a flat object with exactly the
//! fields listed in [`FIELDS`].

use crate::error::{ModelError, ModelResult};
use crate::model::clock::{format_timestamp, Clock, SystemClock};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every field name of the mapping form, in declaration order
pub const FIELDS: [&str; 8] = [
    "capsule_id",
    "name",
    "version",
    "domain_type",
    "description",
    "author",
    "created",
    "updated",
];

/// Fields that must be present at construction
pub const REQUIRED_FIELDS: [&str; 4] = ["capsule_id", "name", "version", "domain_type"];

/// What `from_dict` does with keys that are not capsule fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Fail construction
    #[default]
    Reject,
    /// Drop them silently
    Ignore,
}

/// A packaged collection of content, described by its metadata.
///
/// Fields are read-only once constructed. `created` and `updated` are always
/// set: when not supplied they are taken from the construction clock.
///
/// ```
/// use capsule::model::Capsule;
///
/// let cap = Capsule::new("test-v1", "Test Capsule", "1.0.0", "education");
/// assert_eq!(cap.capsule_id(), "test-v1");
/// assert!(cap.description().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Capsule {
    capsule_id: String,
    name: String,
    version: String,
    domain_type: String,
    description: Option<String>,
    author: Option<String>,
    created: String,
    updated: String,
}

impl Capsule {
    /// Create a capsule from its required fields, timestamped with the system clock
    pub fn new(
        capsule_id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        domain_type: impl Into<String>,
    ) -> Self {
        let clock = SystemClock;
        Capsule {
            capsule_id: capsule_id.into(),
            name: name.into(),
            version: version.into(),
            domain_type: domain_type.into(),
            description: None,
            author: None,
            created: format_timestamp(clock.now()),
            updated: format_timestamp(clock.now()),
        }
    }

    /// Start a capsule with every field unset
    pub fn builder() -> CapsuleBuilder {
        CapsuleBuilder::default()
    }

    pub fn capsule_id(&self) -> &str {
        &self.capsule_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn domain_type(&self) -> &str {
        &self.domain_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// ISO 8601 creation timestamp
    pub fn created(&self) -> &str {
        &self.created
    }

    /// ISO 8601 last-updated timestamp
    pub fn updated(&self) -> &str {
        &self.updated
    }

    /// Serialize to a mapping holding every field, with `null` for absent optionals
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("capsule_id".into(), Value::from(self.capsule_id.as_str()));
        map.insert("name".into(), Value::from(self.name.as_str()));
        map.insert("version".into(), Value::from(self.version.as_str()));
        map.insert("domain_type".into(), Value::from(self.domain_type.as_str()));
        map.insert("description".into(), optional_value(&self.description));
        map.insert("author".into(), optional_value(&self.author));
        map.insert("created".into(), Value::from(self.created.as_str()));
        map.insert("updated".into(), Value::from(self.updated.as_str()));
        map
    }

    /// Build a capsule from a mapping, rejecting unknown keys and using the system clock
    pub fn from_dict(data: &Map<String, Value>) -> ModelResult<Self> {
        Self::from_dict_with(data, UnknownKeys::Reject, &SystemClock)
    }

    /// Build a capsule from a mapping with an explicit unknown-key policy and clock
    pub fn from_dict_with(
        data: &Map<String, Value>,
        unknown_keys: UnknownKeys,
        clock: &dyn Clock,
    ) -> ModelResult<Self> {
        let unknown: Vec<String> = data
            .keys()
            .filter(|key| !FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();

        if !unknown.is_empty() {
            match unknown_keys {
                UnknownKeys::Reject => return Err(ModelError::UnknownFields(unknown)),
                UnknownKeys::Ignore => {
                    tracing::debug!(fields = ?unknown, "ignoring unknown capsule fields");
                }
            }
        }

        let builder = CapsuleBuilder {
            capsule_id: string_field(data, "capsule_id")?,
            name: string_field(data, "name")?,
            version: string_field(data, "version")?,
            domain_type: string_field(data, "domain_type")?,
            description: string_field(data, "description")?,
            author: string_field(data, "author")?,
            created: string_field(data, "created")?,
            updated: string_field(data, "updated")?,
        };

        builder.build_with_clock(clock)
    }
}

impl TryFrom<Map<String, Value>> for Capsule {
    type Error = ModelError;

    fn try_from(data: Map<String, Value>) -> ModelResult<Self> {
        Capsule::from_dict(&data)
    }
}

/// Keyword-style construction of a [`Capsule`]
#[derive(Debug, Clone, Default)]
pub struct CapsuleBuilder {
    capsule_id: Option<String>,
    name: Option<String>,
    version: Option<String>,
    domain_type: Option<String>,
    description: Option<String>,
    author: Option<String>,
    created: Option<String>,
    updated: Option<String>,
}

impl CapsuleBuilder {
    pub fn capsule_id(mut self, capsule_id: impl Into<String>) -> Self {
        self.capsule_id = Some(capsule_id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn domain_type(mut self, domain_type: impl Into<String>) -> Self {
        self.domain_type = Some(domain_type.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Explicit creation timestamp; left to the clock when `None`
    pub fn created(mut self, created: Option<String>) -> Self {
        self.created = created;
        self
    }

    /// Explicit update timestamp; left to the clock when `None`
    pub fn updated(mut self, updated: Option<String>) -> Self {
        self.updated = updated;
        self
    }

    /// Finish construction using the system clock
    pub fn build(self) -> ModelResult<Capsule> {
        self.build_with_clock(&SystemClock)
    }

    /// Finish construction, reading `clock` once for each missing timestamp
    pub fn build_with_clock(self, clock: &dyn Clock) -> ModelResult<Capsule> {
        let capsule_id = self.capsule_id.ok_or(ModelError::MissingField("capsule_id"))?;
        let name = self.name.ok_or(ModelError::MissingField("name"))?;
        let version = self.version.ok_or(ModelError::MissingField("version"))?;
        let domain_type = self
            .domain_type
            .ok_or(ModelError::MissingField("domain_type"))?;

        let created = self
            .created
            .unwrap_or_else(|| format_timestamp(clock.now()));
        let updated = self
            .updated
            .unwrap_or_else(|| format_timestamp(clock.now()));

        tracing::trace!(capsule_id = %capsule_id, "constructed capsule");

        Ok(Capsule {
            capsule_id,
            name,
            version,
            domain_type,
            description: self.description,
            author: self.author,
            created,
            updated,
        })
    }
}

fn optional_value(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.as_str()),
        None => Value::Null,
    }
}

/// Read a string-or-null field; `null` counts as absent
fn string_field(data: &Map<String, Value>, field: &'static str) -> ModelResult<Option<String>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ModelError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}
