use serde::{Deserialize, Serialize};

use crate::association::{AssociationEdge, AssociationKind, AssociationOptions, Associations};
use crate::error::{ModelError, ModelResult};
use crate::model::Model;

/// Name of the primary key every definition starts with.
pub const PRIMARY_KEY: &str = "id";

/// A model as the ORM sees it: table, columns, and applied associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub table_name: String,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub associations: Associations,
}

impl ModelDefinition {
    /// Creates a definition with an integer `id` primary key and a table
    /// name derived from the model name (`Book` -> `books`).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let table_name = format!("{}s", name.to_lowercase());
        Self {
            name,
            table_name,
            attributes: vec![Attribute::primary_key(PRIMARY_KEY)],
            associations: Associations::default(),
        }
    }

    pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Adds a column, rejecting names that are already taken.
    pub fn add_attribute(&mut self, attribute: Attribute) -> ModelResult<()> {
        if self.attribute(&attribute.name).is_some() {
            return Err(ModelError::DuplicateAttribute(format!(
                "{}.{}",
                self.name, attribute.name
            )));
        }
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes that were created by an association.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.references.is_some())
    }

    /// Edges of one kind, in the order they were applied.
    pub fn associations_of(&self, kind: AssociationKind) -> &[AssociationEdge] {
        self.associations.of(kind)
    }

    /// Adds a foreign key column unless one with that name already exists.
    /// Returns `true` if the column was created.
    fn ensure_foreign_key(&mut self, column: String, model: &str, origin: AssociationKind) -> bool {
        if self.attribute(&column).is_some() {
            return false;
        }
        self.attributes.push(Attribute {
            name: column,
            data_type: DataType::Integer,
            allow_null: true,
            primary_key: false,
            references: Some(Reference {
                model: model.to_string(),
                key: PRIMARY_KEY.to_string(),
                origin,
            }),
        });
        true
    }
}

impl Model for ModelDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_association(
        &mut self,
        kind: AssociationKind,
        target: &str,
        options: &AssociationOptions,
    ) -> ModelResult<()> {
        let alias = options.alias()?;
        let explicit_key = options.foreign_key()?;

        match kind {
            AssociationKind::BelongsTo => {
                let column = explicit_key
                    .map(str::to_string)
                    .unwrap_or_else(|| foreign_key_column(alias.unwrap_or(target)));
                self.ensure_foreign_key(column, target, kind);
            }
            AssociationKind::BelongsToMany => {
                // join table lives outside both models; only check the option shape
                options.through()?;
            }
            AssociationKind::HasOne | AssociationKind::HasMany => {}
        }

        self.associations
            .push(kind, AssociationEdge::new(target, options.clone()));
        Ok(())
    }

    fn accept_association(
        &mut self,
        kind: AssociationKind,
        source: &str,
        options: &AssociationOptions,
    ) -> ModelResult<()> {
        if matches!(kind, AssociationKind::HasOne | AssociationKind::HasMany) {
            let column = options
                .foreign_key()?
                .map(str::to_string)
                .unwrap_or_else(|| foreign_key_column(source));
            self.ensure_foreign_key(column, source, kind);
        }
        Ok(())
    }
}

/// `Author` -> `authorId`.
fn foreign_key_column(base: &str) -> String {
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => format!("{}{}Id", first.to_lowercase(), chars.as_str()),
        None => PRIMARY_KEY.to_string(),
    }
}

/// A column of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default = "default_allow_null")]
    pub allow_null: bool,
    #[serde(default)]
    pub primary_key: bool,
    /// Set when the column is a foreign key created by an association.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Reference>,
}

fn default_allow_null() -> bool {
    true
}

impl Attribute {
    fn simple(name: &str, data_type: DataType, allow_null: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            allow_null,
            primary_key: false,
            references: None,
        }
    }

    /// Non-null auto-increment integer key.
    pub fn primary_key(name: &str) -> Self {
        Self {
            primary_key: true,
            ..Self::simple(name, DataType::Integer, false)
        }
    }

    pub fn string(name: &str, allow_null: bool) -> Self {
        Self::simple(name, DataType::String, allow_null)
    }

    pub fn text(name: &str) -> Self {
        Self::simple(name, DataType::Text, true)
    }
}

/// Column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Integer,
    BigInt,
    Float,
    Decimal,
    String,
    Text,
    Boolean,
    Date,
    DateTime,
    Uuid,
    Json,
}

/// Where a foreign key points and which association created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub model: String,
    pub key: String,
    pub origin: AssociationKind,
}
