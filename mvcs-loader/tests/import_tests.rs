mod common;

use common::{RecordingManager, write_library_fixture};
use mvcs_loader::{
    IgnoreRule, LoaderConfig, LoaderError, ModelFile, ModelImporter, ModelLoader,
    TomlModelImporter, model_name_from_path, wire,
};
use mvcs_model::{AssociationKind, AssociationOptions, DataType, ModelDefinition};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn config_for(dir: &Path) -> LoaderConfig {
    LoaderConfig {
        models_path: dir.to_path_buf(),
        ..Default::default()
    }
}

// ── Names ────────────────────────────────────────────────────────

#[test]
fn model_name_comes_from_file_stem() {
    assert_eq!(model_name_from_path(Path::new("models/book.model.toml")), "Book");
    assert_eq!(model_name_from_path(Path::new("notamodel.toml")), "Notamodel");
    assert_eq!(model_name_from_path(Path::new("/x/userProfile.model.toml")), "UserProfile");
}

// ── TomlModelImporter ────────────────────────────────────────────

#[test]
fn imports_attributes_and_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person.model.toml");
    fs::write(
        &path,
        r#"
name = "Person"
table = "people"

[[attributes]]
name = "email"
type = "string"
allow_null = false

[[attributes]]
name = "bio"
type = "text"
"#,
    )
    .unwrap();

    let descriptor = TomlModelImporter.import(&path).unwrap();
    assert!(!descriptor.has_associate());
    let person = descriptor.model;
    assert_eq!(person.name, "Person");
    assert_eq!(person.table_name, "people");
    let names: Vec<_> = person.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "email", "bio"]);
    assert!(!person.attribute("email").unwrap().allow_null);
    assert_eq!(person.attribute("bio").unwrap().data_type, DataType::Text);
}

#[test]
fn explicit_primary_key_replaces_default() {
    let file: ModelFile = toml::from_str(
        r#"
[[attributes]]
name = "id"
type = "uuid"
primary_key = true
allow_null = false
"#,
    )
    .unwrap();
    let descriptor = file.into_descriptor("Session").unwrap();
    let id = descriptor.model.attribute("id").unwrap();
    assert_eq!(id.data_type, DataType::Uuid);
    assert_eq!(descriptor.model.attributes.len(), 1);
}

#[test]
fn duplicate_attribute_is_rejected() {
    let file: ModelFile = toml::from_str(
        r#"
[[attributes]]
name = "title"
type = "string"

[[attributes]]
name = "title"
type = "text"
"#,
    )
    .unwrap();
    let err = file.into_descriptor("Book").unwrap_err();
    assert!(matches!(err, LoaderError::Model { ref model, .. } if model == "Book"));
}

#[test]
fn declared_associations_are_replayed_in_file_order() {
    let file: ModelFile = toml::from_str(
        r#"
[[associations]]
kind = "hasMany"
target = "Book"
options = { as = "books" }

[[associations]]
kind = "belongs_to"
target = "Publisher"
"#,
    )
    .unwrap();
    let author = file.into_descriptor("Author").unwrap();
    assert!(author.has_associate());

    let models = wire(
        [
            author,
            mvcs_loader::ModelDescriptor::new(ModelDefinition::new("Book")),
            mvcs_loader::ModelDescriptor::new(ModelDefinition::new("Publisher")),
        ],
        &AssociationKind::DEFAULT_ORDER,
    )
    .unwrap();
    let author = &models["Author"];
    assert_eq!(author.associations.has_many[0].options, AssociationOptions::with_alias("books"));
    assert_eq!(author.associations.belongs_to[0].target, "Publisher");
    assert!(author.associations.belongs_to[0].options.is_empty());
}

#[test]
fn invalid_toml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.model.toml");
    fs::write(&path, "[[associations]]\nkind = \"hasSome\"\ntarget = \"X\"\n").unwrap();

    let err = TomlModelImporter.import(&path).unwrap_err();
    match &err {
        LoaderError::InvalidModelFile { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected InvalidModelFile, got {other:?}"),
    }
    assert!(err.to_string().contains("broken.model.toml"));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.model.toml");
    fs::write(&path, "colour = \"blue\"\n").unwrap();
    assert!(matches!(
        TomlModelImporter.import(&path),
        Err(LoaderError::InvalidModelFile { .. })
    ));
}

// ── ModelLoader ──────────────────────────────────────────────────

#[test]
fn loads_every_file_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_library_fixture(dir.path());

    let db = ModelLoader::toml(config_for(dir.path()))
        .load(Arc::new(RecordingManager::default()))
        .unwrap();
    let names: Vec<_> = db.models().names().collect();
    assert_eq!(names, vec!["Author", "Book", "Ignore", "Isbn", "Notamodel", "Tag"]);
    assert_eq!(db.model("Notamodel").unwrap().table_name, "misc");
}

#[test]
fn model_suffix_filters_files() {
    let dir = tempfile::tempdir().unwrap();
    write_library_fixture(dir.path());

    let config = LoaderConfig {
        model_suffix: Some(".model.toml".into()),
        ..config_for(dir.path())
    };
    let db = ModelLoader::toml(config)
        .load(Arc::new(RecordingManager::default()))
        .unwrap();
    assert!(db.model("Ignore").is_some());
    assert!(db.model("Notamodel").is_none());
    assert_eq!(db.models().len(), 5);
}

#[test]
fn ignore_list_and_suffix_together() {
    let dir = tempfile::tempdir().unwrap();
    write_library_fixture(dir.path());

    let config = LoaderConfig {
        ignore: vec!["ignore.model.toml".into()],
        model_suffix: Some(".model.toml".into()),
        ..config_for(dir.path())
    };
    let db = ModelLoader::toml(config)
        .load(Arc::new(RecordingManager::default()))
        .unwrap();
    assert_eq!(db.models().names().collect::<Vec<_>>(), vec!["Author", "Book", "Isbn", "Tag"]);
}

#[test]
fn loaded_directory_is_fully_wired() {
    let dir = tempfile::tempdir().unwrap();
    write_library_fixture(dir.path());

    let db = ModelLoader::toml(config_for(dir.path()))
        .ignore(IgnoreRule::require_suffix(".model.toml"))
        .load(Arc::new(RecordingManager::default()))
        .unwrap();

    let author = db.model("Author").unwrap();
    assert_eq!(author.associations.has_many.len(), 1);
    assert_eq!(author.associations.has_many[0].target, "Book");
    assert_eq!(author.attribute("name").unwrap().data_type, DataType::String);

    let book = db.model("Book").unwrap();
    assert_eq!(book.associations.belongs_to_many[0].options.through().unwrap(), Some("book_tags"));
    assert_eq!(
        book.attribute("authorId").unwrap().references.as_ref().unwrap().origin,
        AssociationKind::BelongsTo
    );

    let ignore = db.model("Ignore").unwrap();
    assert!(ignore.associations.is_empty());
}

#[test]
fn unknown_reference_in_directory_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("book.model.toml"),
        "[[associations]]\nkind = \"belongs_to\"\ntarget = \"Author\"\n",
    )
    .unwrap();

    let result = ModelLoader::toml(config_for(dir.path())).load(Arc::new(RecordingManager::default()));
    assert!(matches!(result, Err(LoaderError::UnknownModel { .. })));
}

#[test]
fn discover_reports_files_without_importing() {
    let dir = tempfile::tempdir().unwrap();
    write_library_fixture(dir.path());
    fs::write(dir.path().join("zz-broken.model.toml"), "not toml at all [").unwrap();

    let loader = ModelLoader::toml(config_for(dir.path()));
    assert_eq!(loader.discover().unwrap().len(), 7);
    assert!(matches!(
        loader.load(Arc::new(RecordingManager::default())),
        Err(LoaderError::InvalidModelFile { .. })
    ));
}
