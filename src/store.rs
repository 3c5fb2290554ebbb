//! SQLite-backed store of named array configurations.
//!
//! Each config tree is stored as one JSON document under its root name.
//! Documents are read back through the loader, so a stored document that lacks
//! a required field fails with [`ArrayConfigError::MissingRequiredField`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    config::{ArrayConfig, ArrayRecipe},
    errors::ArrayConfigError,
    loader::load_array_config_at,
    schema::ensure_schema,
};

pub struct ConfigStore {
    conn: Connection,
}

impl ConfigStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArrayConfigError> {
        let conn =
            Connection::open(path).map_err(|e| ArrayConfigError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, ArrayConfigError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ArrayConfigError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Storing an identical config again is a no-op; a different config under
    /// an existing name is rejected.
    pub fn store_array_config(&self, config: &ArrayConfig) -> Result<(), ArrayConfigError> {
        let name = config.name();
        if let Some(existing) = self.find(name)? {
            if existing == *config {
                return Ok(());
            }
            return Err(ArrayConfigError::invalid_config(format!(
                "a different array config named `{name}` is already stored"
            )));
        }
        let data = serde_json::to_string(config)
            .map_err(|e| ArrayConfigError::serialization(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO array_configs(name, kind, data) VALUES(?1, ?2, ?3)",
                params![name, config.kind().as_str(), data],
            )
            .map_err(|e| ArrayConfigError::query(e.to_string()))?;
        log::debug!("stored array config `{name}`");
        Ok(())
    }

    pub fn retrieve_array_config(&self, name: &str) -> Result<ArrayConfig, ArrayConfigError> {
        self.find(name)?
            .ok_or_else(|| ArrayConfigError::not_found(format!("array config `{name}`")))
    }

    pub fn retrieve_array_config_names(&self) -> Result<Vec<String>, ArrayConfigError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM array_configs ORDER BY name")
            .map_err(|e| ArrayConfigError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ArrayConfigError::query(e.to_string()))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| ArrayConfigError::query(e.to_string()))?);
        }
        Ok(names)
    }

    pub fn delete_array_config(&self, name: &str) -> Result<(), ArrayConfigError> {
        let affected = self
            .conn
            .execute("DELETE FROM array_configs WHERE name=?1", params![name])
            .map_err(|e| ArrayConfigError::query(e.to_string()))?;
        if affected == 0 {
            return Err(ArrayConfigError::not_found(format!("array config `{name}`")));
        }
        log::debug!("deleted array config `{name}`");
        Ok(())
    }

    fn find(&self, name: &str) -> Result<Option<ArrayConfig>, ArrayConfigError> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM array_configs WHERE name=?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ArrayConfigError::query(e.to_string()))?;
        let Some(data) = data else {
            return Ok(None);
        };
        let value: serde_json::Value = serde_json::from_str(&data)
            .map_err(|e| ArrayConfigError::serialization(format!("{name}: {e}")))?;
        load_array_config_at(&value, name).map(Some)
    }
}
