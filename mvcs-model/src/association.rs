use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// A category of relationship between two models.
///
/// The serialized form is snake_case (`belongs_to`); the ORM's camelCase
/// spelling (`belongsTo`) is accepted on input and used by `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    #[serde(alias = "belongsTo")]
    BelongsTo,
    #[serde(alias = "hasOne")]
    HasOne,
    #[serde(alias = "belongsToMany")]
    BelongsToMany,
    #[serde(alias = "hasMany")]
    HasMany,
}

impl AssociationKind {
    /// Every kind, in declaration order of the enum.
    pub const ALL: [AssociationKind; 4] = [
        AssociationKind::BelongsTo,
        AssociationKind::HasOne,
        AssociationKind::BelongsToMany,
        AssociationKind::HasMany,
    ];

    /// Wiring order that lets key-creating kinds run before the kinds that
    /// only reference those keys.
    pub const DEFAULT_ORDER: [AssociationKind; 4] = Self::ALL;

    /// Stable position of this kind inside [`AssociationKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::BelongsTo => 0,
            Self::HasOne => 1,
            Self::BelongsToMany => 2,
            Self::HasMany => 3,
        }
    }

    /// The ORM method name for this kind (`belongsTo`, `hasMany`, ...).
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongsTo",
            Self::HasOne => "hasOne",
            Self::BelongsToMany => "belongsToMany",
            Self::HasMany => "hasMany",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for AssociationKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "belongsTo" | "belongs_to" => Ok(Self::BelongsTo),
            "hasOne" | "has_one" => Ok(Self::HasOne),
            "belongsToMany" | "belongs_to_many" => Ok(Self::BelongsToMany),
            "hasMany" | "has_many" => Ok(Self::HasMany),
            other => Err(ModelError::InvalidOptions(format!(
                "unknown association kind: {other}"
            ))),
        }
    }
}

/// Opaque configuration bag attached to an association declaration.
///
/// The loader never inspects or rewrites it; the accessors below only read
/// the handful of keys the bundled [`ModelDefinition`](crate::ModelDefinition)
/// understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociationOptions(Map<String, Value>);

impl AssociationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `{ "as": alias }`.
    pub fn with_alias(alias: &str) -> Self {
        Self::new().with("as", alias)
    }

    /// Returns the bag with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `as` option: the name the association is exposed under.
    pub fn alias(&self) -> ModelResult<Option<&str>> {
        self.string_option("as")
    }

    /// The `foreignKey` option, overriding the derived foreign key column.
    pub fn foreign_key(&self) -> ModelResult<Option<&str>> {
        self.string_option("foreignKey")
    }

    /// The `through` option naming a join table for many-to-many edges.
    pub fn through(&self) -> ModelResult<Option<&str>> {
        self.string_option("through")
    }

    fn string_option(&self, key: &str) -> ModelResult<Option<&str>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ModelError::InvalidOptions(format!(
                "`{key}` must be a string, got {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for AssociationOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for AssociationOptions {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::InvalidOptions(format!(
                "options must be an object, got {other}"
            ))),
        }
    }
}

/// One applied association: the target model's name and the options it was
/// declared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationEdge {
    pub target: String,
    pub options: AssociationOptions,
}

impl AssociationEdge {
    pub fn new(target: impl Into<String>, options: AssociationOptions) -> Self {
        Self {
            target: target.into(),
            options,
        }
    }
}

/// Per-kind edge lists of a model. All four lists always exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Associations {
    pub belongs_to: Vec<AssociationEdge>,
    pub has_one: Vec<AssociationEdge>,
    pub belongs_to_many: Vec<AssociationEdge>,
    pub has_many: Vec<AssociationEdge>,
}

impl Associations {
    /// Edges of the given kind, in the order they were applied.
    pub fn of(&self, kind: AssociationKind) -> &[AssociationEdge] {
        match kind {
            AssociationKind::BelongsTo => &self.belongs_to,
            AssociationKind::HasOne => &self.has_one,
            AssociationKind::BelongsToMany => &self.belongs_to_many,
            AssociationKind::HasMany => &self.has_many,
        }
    }

    pub fn push(&mut self, kind: AssociationKind, edge: AssociationEdge) {
        let list = match kind {
            AssociationKind::BelongsTo => &mut self.belongs_to,
            AssociationKind::HasOne => &mut self.has_one,
            AssociationKind::BelongsToMany => &mut self.belongs_to_many,
            AssociationKind::HasMany => &mut self.has_many,
        };
        list.push(edge);
    }

    /// Total number of edges across all kinds.
    pub fn len(&self) -> usize {
        AssociationKind::ALL.iter().map(|k| self.of(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
