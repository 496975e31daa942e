//! Read-only access to the weapon database.
//!
//! The store is pre-populated externally; every operation here is a pure
//! read. One connection is opened at startup and held for the life of the
//! application. Statements are scoped per call and finalized when they
//! drop, on every exit path.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{named_params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;

use super::StoreError;

/// Database file name as shipped alongside the game data.
pub const DEFAULT_DB_NAME: &str = "KenshiData";

const TABLES_SQL: &str =
    "SELECT name FROM sqlite_schema WHERE type ='table' AND name NOT LIKE 'sqlite_%'";

const WEAPON_NAME_SQL: &str = "SELECT name FROM WeaponName;";
const WEAPON_CLASS_SQL: &str = "SELECT name FROM WeaponClass;";
const WEAPON_QUALITY_SQL: &str = "SELECT name FROM WeaponQuality;";
const WEAPON_IMAGE_SQL: &str = "SELECT path FROM WeaponImage;";

const WEAPON_BY_NAME_SQL: &str =
    "SELECT name, type, cut_damage, blunt_damage FROM Weapon WHERE name = :name";
const WEAPON_NAMES_BY_CLASS_SQL: &str = "SELECT name FROM WeaponNamesByClass WHERE type=:class";

/// A single row of the Weapon table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    pub name: String,
    pub class: String,
    pub cut_damage: f32,
    pub blunt_damage: f32,
}

/// Read-only handle to the weapon database.
pub struct WeaponStore {
    conn: Connection,
}

impl WeaponStore {
    /// Open the database at `path` in read-only, full-mutex mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { conn })
    }

    /// Table names, excluding SQLite's internal tables.
    pub fn table_names(&self) -> Result<Vec<String>, StoreError> {
        self.collect_names(TABLES_SQL)
    }

    /// All weapon class names, in store order.
    pub fn weapon_classes(&self) -> Result<Vec<String>, StoreError> {
        self.collect_names(WEAPON_CLASS_SQL)
    }

    /// All weapon quality tier names, in store order.
    pub fn weapon_qualities(&self) -> Result<Vec<String>, StoreError> {
        self.collect_names(WEAPON_QUALITY_SQL)
    }

    /// All weapon names, in store order.
    pub fn weapon_names(&self) -> Result<Vec<String>, StoreError> {
        self.collect_names(WEAPON_NAME_SQL)
    }

    /// All weapon image paths. Nothing in this tool renders them.
    pub fn weapon_image_paths(&self) -> Result<Vec<String>, StoreError> {
        self.collect_names(WEAPON_IMAGE_SQL)
    }

    /// Weapon names belonging to `class`, in result order.
    ///
    /// The class name is bound as a named parameter, so names containing
    /// quote characters filter correctly. An empty or unknown class yields
    /// an empty Vec, not an error.
    pub fn weapon_names_by_class(&self, class: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(WEAPON_NAMES_BY_CLASS_SQL)?;
        let rows = stmt.query_map(named_params! { ":class": class }, |row| {
            row.get::<_, Option<String>>(0)
        })?;

        let mut names = Vec::new();
        for row in rows {
            // A NULL name column skips the row; it never becomes "".
            if let Some(name) = row? {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Look up a single weapon by exact stored name.
    pub fn weapon_by_name(&self, name: &str) -> Result<Option<Weapon>, StoreError> {
        let mut stmt = self.conn.prepare(WEAPON_BY_NAME_SQL)?;
        let weapon = stmt
            .query_row(named_params! { ":name": name }, |row| {
                Ok(Weapon {
                    name: row.get(0)?,
                    class: row.get(1)?,
                    cut_damage: row.get(2)?,
                    blunt_damage: row.get(3)?,
                })
            })
            .optional()?;
        Ok(weapon)
    }

    fn collect_names(&self, sql: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;

        let mut names = Vec::new();
        for row in rows {
            if let Some(name) = row? {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// Resolve the database location: explicit override, then the working
/// directory, then the platform data directory.
pub fn locate_database(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    let local = PathBuf::from(DEFAULT_DB_NAME);
    if local.exists() {
        return local;
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "kenshi-calc") {
        let candidate = proj_dirs.data_dir().join(DEFAULT_DB_NAME);
        if candidate.exists() {
            return candidate;
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_database_prefers_override() {
        let path = PathBuf::from("/somewhere/else/weapons.db");
        assert_eq!(locate_database(Some(path.clone())), path);
    }

    #[test]
    fn test_locate_database_defaults_to_local_name() {
        // No override and no file on disk: fall back to the plain name so
        // the open error names something recognizable.
        let resolved = locate_database(None);
        assert!(resolved.ends_with(DEFAULT_DB_NAME));
    }
}
