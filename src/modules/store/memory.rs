use std::collections::BTreeMap;

use super::{Cookie, CookieJar, KeyValueStore};
use crate::modules::common::error::SweepError;

/// 进程内存储
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    cookies: Vec<Cookie>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SweepError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SweepError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SweepError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, SweepError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), SweepError> {
        self.entries.clear();
        Ok(())
    }
}

impl CookieJar for MemoryStore {
    fn cookies(&self) -> Result<Vec<Cookie>, SweepError> {
        Ok(self.cookies.clone())
    }

    fn put_cookie(&mut self, cookie: Cookie) -> Result<(), SweepError> {
        self.cookies
            .retain(|c| !(c.name == cookie.name && c.path == cookie.path));
        self.cookies.push(cookie);
        Ok(())
    }
}
