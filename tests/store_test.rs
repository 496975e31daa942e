//! Integration tests exercising the read-only weapon store against a
//! fixture database.
//!
//! The fixture is built once with a writable connection and then only ever
//! opened read-only through `WeaponStore`, matching how the tool meets the
//! real game data.

use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

use kenshi_calc::store::{StoreError, WeaponStore};

/// Shared fixture database - created once and reused for all tests
static FIXTURE: Lazy<Mutex<Fixture>> = Lazy::new(|| Mutex::new(Fixture::new()));

const FIXTURE_SQL: &str = r#"
CREATE TABLE WeaponClass (name TEXT);
CREATE TABLE WeaponQuality (name TEXT);
CREATE TABLE WeaponName (name TEXT);
CREATE TABLE WeaponImage (path TEXT);
CREATE TABLE WeaponNamesByClass (name TEXT, type TEXT);
CREATE TABLE Weapon (name TEXT, type TEXT, cut_damage REAL, blunt_damage REAL);

INSERT INTO WeaponClass (name) VALUES
    ('Sabres'),
    ('Katanas'),
    ('O''Brien'),
    ('Polearms');

INSERT INTO WeaponQuality (name) VALUES
    ('Rusting Junk'),
    ('Catun No.1'),
    ('Edge Type 1');

INSERT INTO WeaponName (name) VALUES
    ('Horse_Chopper'),
    ('Wakizashi'),
    ('Desert_Sabre'),
    ('Nodachi');

INSERT INTO WeaponImage (path) VALUES
    ('images/horse_chopper.png'),
    ('images/wakizashi.png');

INSERT INTO WeaponNamesByClass (name, type) VALUES
    ('Desert_Sabre', 'Sabres'),
    ('Horse_Chopper', 'Sabres'),
    ('Wakizashi', 'Katanas'),
    (NULL, 'Katanas'),
    ('Nodachi', 'Katanas'),
    ('Iron_Stick', 'O''Brien');

INSERT INTO Weapon (name, type, cut_damage, blunt_damage) VALUES
    ('Desert_Sabre', 'Sabres', 1.1, 0.4),
    ('Horse_Chopper', 'Sabres', 0.8, 1.2),
    ('Wakizashi', 'Katanas', 1.0, 0.1),
    ('Nodachi', 'Katanas', 1.25, 0.2);
"#;

struct Fixture {
    _dir: TempDir,
    db_path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("KenshiData");

        let conn = Connection::open(&db_path).expect("Failed to create fixture database");
        conn.execute_batch(FIXTURE_SQL)
            .expect("Failed to populate fixture database");

        Self {
            _dir: dir,
            db_path,
        }
    }

    fn store(&self) -> WeaponStore {
        WeaponStore::open(&self.db_path).expect("Failed to open fixture store")
    }

    fn raw_connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("Failed to open raw connection")
    }
}

fn fixture_store() -> WeaponStore {
    FIXTURE.lock().unwrap().store()
}

// =============================================================================
// Lookup list queries
// =============================================================================

#[test]
fn test_weapon_classes_in_store_order() {
    let store = fixture_store();
    let classes = store.weapon_classes().unwrap();
    assert_eq!(classes, vec!["Sabres", "Katanas", "O'Brien", "Polearms"]);
}

#[test]
fn test_weapon_qualities_in_store_order() {
    let store = fixture_store();
    let qualities = store.weapon_qualities().unwrap();
    assert_eq!(qualities, vec!["Rusting Junk", "Catun No.1", "Edge Type 1"]);
}

#[test]
fn test_weapon_names_lists_all() {
    let store = fixture_store();
    let names = store.weapon_names().unwrap();
    assert_eq!(
        names,
        vec!["Horse_Chopper", "Wakizashi", "Desert_Sabre", "Nodachi"]
    );
}

#[test]
fn test_weapon_image_paths() {
    let store = fixture_store();
    let paths = store.weapon_image_paths().unwrap();
    assert_eq!(
        paths,
        vec!["images/horse_chopper.png", "images/wakizashi.png"]
    );
}

#[test]
fn test_table_names_excludes_internal_tables() {
    let store = fixture_store();
    let tables = store.table_names().unwrap();
    assert!(tables.contains(&"WeaponClass".to_string()));
    assert!(tables.contains(&"WeaponNamesByClass".to_string()));
    assert!(!tables.iter().any(|t| t.starts_with("sqlite_")));
}

// =============================================================================
// Names-by-class (parameterized query)
// =============================================================================

#[test]
fn test_names_by_class_matches_relation_dump() {
    let fixture = FIXTURE.lock().unwrap();
    let store = fixture.store();

    // Full dump of the relation, for cross-checking each class result.
    let raw = fixture.raw_connection();
    let mut stmt = raw
        .prepare("SELECT name, type FROM WeaponNamesByClass WHERE name IS NOT NULL")
        .unwrap();
    let all_rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    for class in store.weapon_classes().unwrap() {
        let expected: Vec<&str> = all_rows
            .iter()
            .filter(|(_, t)| *t == class)
            .map(|(n, _)| n.as_str())
            .collect();
        let got = store.weapon_names_by_class(&class).unwrap();
        assert_eq!(got, expected, "mismatch for class {:?}", class);
    }
}

#[test]
fn test_names_by_class_preserves_result_order() {
    let store = fixture_store();
    let names = store.weapon_names_by_class("Sabres").unwrap();
    assert_eq!(names, vec!["Desert_Sabre", "Horse_Chopper"]);
}

#[test]
fn test_empty_class_name_yields_empty_list() {
    let store = fixture_store();
    let names = store.weapon_names_by_class("").unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_unknown_class_yields_empty_list() {
    let store = fixture_store();
    let names = store.weapon_names_by_class("Crossbows").unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_class_with_quote_character_filters_correctly() {
    // A class literally named O'Brien must bind as data, not as SQL.
    let store = fixture_store();
    let names = store.weapon_names_by_class("O'Brien").unwrap();
    assert_eq!(names, vec!["Iron_Stick"]);
}

#[test]
fn test_injection_attempt_returns_nothing() {
    let store = fixture_store();
    let names = store
        .weapon_names_by_class("Sabres' OR '1'='1")
        .unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_null_name_rows_are_skipped() {
    // Katanas has a NULL name row between Wakizashi and Nodachi.
    let store = fixture_store();
    let names = store.weapon_names_by_class("Katanas").unwrap();
    assert_eq!(names, vec!["Wakizashi", "Nodachi"]);
}

#[test]
fn test_repeated_queries_reuse_the_connection() {
    // Statements are per-call; a long session must not exhaust them.
    let store = fixture_store();
    for _ in 0..200 {
        assert_eq!(store.weapon_names_by_class("Sabres").unwrap().len(), 2);
        assert!(store.weapon_names_by_class("").unwrap().is_empty());
    }
}

// =============================================================================
// Weapon lookup
// =============================================================================

#[test]
fn test_weapon_by_name_found() {
    let store = fixture_store();
    let weapon = store.weapon_by_name("Nodachi").unwrap().unwrap();
    assert_eq!(weapon.class, "Katanas");
    assert!((weapon.cut_damage - 1.25).abs() < 1e-6);
    assert!((weapon.blunt_damage - 0.2).abs() < 1e-6);
}

#[test]
fn test_weapon_by_name_missing_is_none() {
    let store = fixture_store();
    assert!(store.weapon_by_name("Meitou_Falling_Sun").unwrap().is_none());
}

// =============================================================================
// Open failures
// =============================================================================

#[test]
fn test_open_missing_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("NoSuchData");
    match WeaponStore::open(&missing) {
        Err(StoreError::Open { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Open error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_query_against_wrong_schema_is_query_error() {
    // A database without the weapon tables opens fine but every lookup
    // reports a query failure, which the shell downgrades to empty lists.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("EmptyData");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (id INTEGER);")
        .unwrap();

    let store = WeaponStore::open(&path).unwrap();
    match store.weapon_classes() {
        Err(StoreError::Query { .. }) => {}
        other => panic!("expected Query error, got {:?}", other),
    }
}
