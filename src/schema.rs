use rusqlite::Connection;

use crate::errors::ArrayConfigError;

pub fn ensure_schema(conn: &Connection) -> Result<(), ArrayConfigError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS array_configs (
            name TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            data TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_array_configs_kind ON array_configs(kind);
        "#,
    )
    .map_err(|e| ArrayConfigError::schema(e.to_string()))?;
    Ok(())
}
