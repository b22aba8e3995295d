//! 本地键值存储与 Cookie 存储
//!
//! 清理逻辑只依赖这里的 trait，持久化由 SQLite 实现，测试使用内存实现

pub mod cookies;
pub mod memory;
pub mod sqlite;

use chrono::Utc;

use crate::modules::common::error::SweepError;
pub use cookies::Cookie;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// 字符串键值存储（对应页面的 localStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SweepError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SweepError>;

    fn remove(&mut self, key: &str) -> Result<(), SweepError>;

    fn keys(&self) -> Result<Vec<String>, SweepError>;

    fn clear(&mut self) -> Result<(), SweepError>;
}

/// 当前上下文可见的 Cookie
pub trait CookieJar {
    /// 全部已存储的 Cookie，包括已过期的
    fn cookies(&self) -> Result<Vec<Cookie>, SweepError>;

    /// 写入 Cookie，同名同路径的会被替换
    fn put_cookie(&mut self, cookie: Cookie) -> Result<(), SweepError>;

    fn live_cookies(&self) -> Result<Vec<Cookie>, SweepError> {
        let now = Utc::now();
        Ok(self
            .cookies()?
            .into_iter()
            .filter(|c| !c.is_expired(now))
            .collect())
    }

    /// `name=value; name2=value2` 形式的可见 Cookie 串
    fn cookie_string(&self) -> Result<String, SweepError> {
        Ok(self
            .live_cookies()?
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    /// 按赋值语句写入
    fn assign_cookie(&mut self, assignment: &str) -> Result<(), SweepError> {
        let cookie = cookies::parse_assignment(assignment)?;
        self.put_cookie(cookie)
    }
}

pub trait BrowserStore: KeyValueStore + CookieJar + Send {}

impl<T: KeyValueStore + CookieJar + Send> BrowserStore for T {}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// 可在指定操作上失败的存储
    #[derive(Debug, Default)]
    pub struct FailingStore {
        pub inner: MemoryStore,
        pub fail_clear: Option<String>,
        pub fail_cookies: Option<String>,
        pub fail_remove: Option<String>,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, SweepError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SweepError> {
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), SweepError> {
            if let Some(message) = &self.fail_remove {
                return Err(SweepError::Storage(message.clone()));
            }
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, SweepError> {
            self.inner.keys()
        }

        fn clear(&mut self) -> Result<(), SweepError> {
            if let Some(message) = &self.fail_clear {
                return Err(SweepError::Execution(message.clone()));
            }
            self.inner.clear()
        }
    }

    impl CookieJar for FailingStore {
        fn cookies(&self) -> Result<Vec<Cookie>, SweepError> {
            if let Some(message) = &self.fail_cookies {
                return Err(SweepError::Execution(message.clone()));
            }
            self.inner.cookies()
        }

        fn put_cookie(&mut self, cookie: Cookie) -> Result<(), SweepError> {
            self.inner.put_cookie(cookie)
        }
    }
}
