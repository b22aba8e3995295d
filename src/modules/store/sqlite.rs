//! SQLite 持久化存储
//!
//! `local_storage` 表对应页面的 localStorage，`cookies` 表保存 Cookie

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Cookie, CookieJar, KeyValueStore};
use crate::modules::common::error::SweepError;

pub const DB_FILE_NAME: &str = "storage.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS local_storage (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS cookies (
    name    TEXT NOT NULL,
    path    TEXT NOT NULL,
    value   TEXT NOT NULL,
    expires TEXT,
    PRIMARY KEY (name, path)
);
";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// 打开（必要时创建）存储目录下的数据库
    pub fn open(dir: &Path) -> Result<Self, SweepError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(DB_FILE_NAME);
        tracing::debug!("打开本地存储: {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SweepError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SweepError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, SweepError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SweepError> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SweepError> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, SweepError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn clear(&mut self) -> Result<(), SweepError> {
        self.conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }
}

impl CookieJar for SqliteStore {
    fn cookies(&self) -> Result<Vec<Cookie>, SweepError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, value, path, expires FROM cookies ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut cookies = Vec::with_capacity(rows.len());
        for (name, value, path, expires) in rows {
            let expires = match expires {
                Some(raw) => Some(
                    DateTime::parse_from_rfc3339(&raw)
                        .map_err(|e| {
                            SweepError::Storage(format!("Cookie 过期时间损坏 {}: {}", name, e))
                        })?
                        .with_timezone(&Utc),
                ),
                None => None,
            };
            cookies.push(Cookie {
                name,
                value,
                path,
                expires,
            });
        }
        Ok(cookies)
    }

    fn put_cookie(&mut self, cookie: Cookie) -> Result<(), SweepError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO cookies (name, path, value, expires) VALUES (?1, ?2, ?3, ?4)",
            params![
                cookie.name,
                cookie.path,
                cookie.value,
                cookie.expires.map(|e| e.to_rfc3339())
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap_or_else(|e| panic!("open sqlite: {}", e))
    }

    #[test]
    fn set_get_remove_round_trip() {
        let mut store = store();
        assert!(store.set("cache_page", "x").is_ok());
        assert!(store.set("cache_page", "y").is_ok());
        assert_eq!(store.get("cache_page").unwrap_or_default(), Some("y".to_string()));

        assert!(store.remove("cache_page").is_ok());
        assert_eq!(store.get("cache_page").unwrap_or_default(), None);
    }

    #[test]
    fn clear_wipes_local_storage_but_not_cookies() {
        let mut store = store();
        assert!(store.set("a", "1").is_ok());
        assert!(store.set("b", "2").is_ok());
        assert!(store.assign_cookie("sid=1").is_ok());

        assert!(store.clear().is_ok());
        assert!(store.keys().unwrap_or_default().is_empty());
        assert_eq!(store.cookie_string().unwrap_or_default(), "sid=1");
    }

    #[test]
    fn cookie_expiry_survives_persistence() {
        let mut store = store();
        assert!(store
            .assign_cookie("sid=1; expires=Thu, 01 Jan 1970 00:00:00 GMT")
            .is_ok());

        let cookies = store.cookies().unwrap_or_default();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].expires.map(|e| e.timestamp()), Some(0));
        assert!(store.live_cookies().unwrap_or_default().is_empty());
    }

    #[test]
    fn open_creates_database_file_in_directory() {
        let dir = std::env::temp_dir().join(format!("cache-sweep-test-{}", uuid::Uuid::new_v4()));
        {
            let mut store = SqliteStore::open(&dir).unwrap_or_else(|e| panic!("{}", e));
            assert!(store.set("k", "v").is_ok());
        }
        assert!(dir.join(DB_FILE_NAME).exists());

        let reopened = SqliteStore::open(&dir).unwrap_or_else(|e| panic!("{}", e));
        assert_eq!(reopened.get("k").unwrap_or_default(), Some("v".to_string()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
