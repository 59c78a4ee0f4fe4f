//! Shared test helpers for loader tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mvcs_db::{DbResult, TransactionManager};
use mvcs_loader::ModelDescriptor;
use mvcs_model::{AssociationOptions, ModelDefinition};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// The library fixture:
/// - Author hasMany Book (as books)
/// - Book belongsTo Author (as author), hasOne Isbn (as isbn), belongsToMany Tag (as bookTags)
/// - Isbn belongsTo Book (as book)
/// - Tag belongsToMany Book (as bookTags)
/// - Ignore declares nothing
///
/// Listed in the same order the fixture directory sorts in.
pub fn library_models() -> Vec<ModelDescriptor<ModelDefinition>> {
    vec![
        ModelDescriptor::new(ModelDefinition::new("Author")).with_associate(|r| {
            r.has_many("Book", AssociationOptions::with_alias("books"));
        }),
        ModelDescriptor::new(ModelDefinition::new("Book")).with_associate(|r| {
            r.belongs_to("Author", AssociationOptions::with_alias("author"))
                .has_one("Isbn", AssociationOptions::with_alias("isbn"))
                .belongs_to_many("Tag", AssociationOptions::with_alias("bookTags"));
        }),
        ModelDescriptor::new(ModelDefinition::new("Ignore")),
        ModelDescriptor::new(ModelDefinition::new("Isbn")).with_associate(|r| {
            r.belongs_to("Book", AssociationOptions::with_alias("book"));
        }),
        ModelDescriptor::new(ModelDefinition::new("Tag")).with_associate(|r| {
            r.belongs_to_many("Book", AssociationOptions::with_alias("bookTags"));
        }),
    ]
}

/// Writes the library fixture as TOML model files, plus `notamodel.toml`
/// which lacks the `.model.toml` suffix.
pub fn write_library_fixture(dir: &Path) {
    let files = [
        (
            "author.model.toml",
            r#"
[[attributes]]
name = "name"
type = "string"
allow_null = false

[[associations]]
kind = "hasMany"
target = "Book"
options = { as = "books" }
"#,
        ),
        (
            "book.model.toml",
            r#"
[[attributes]]
name = "title"
type = "string"

[[associations]]
kind = "belongs_to"
target = "Author"
options = { as = "author" }

[[associations]]
kind = "has_one"
target = "Isbn"
options = { as = "isbn" }

[[associations]]
kind = "belongs_to_many"
target = "Tag"
options = { as = "bookTags", through = "book_tags" }
"#,
        ),
        ("ignore.model.toml", ""),
        (
            "isbn.model.toml",
            r#"
[[associations]]
kind = "belongs_to"
target = "Book"
options = { as = "book" }
"#,
        ),
        (
            "tag.model.toml",
            r#"
[[associations]]
kind = "belongs_to_many"
target = "Book"
options = { as = "bookTags", through = "book_tags" }
"#,
        ),
        ("notamodel.toml", "table = \"misc\"\n"),
    ];

    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
}

/// Transaction manager that only records calls.
#[derive(Default)]
pub struct RecordingManager {
    pub calls: Mutex<Vec<&'static str>>,
}

impl RecordingManager {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionManager for RecordingManager {
    async fn begin(&self) -> DbResult<()> {
        self.calls.lock().unwrap().push("begin");
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        self.calls.lock().unwrap().push("commit");
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        self.calls.lock().unwrap().push("rollback");
        Ok(())
    }
}
