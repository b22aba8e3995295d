use crate::modules::common::error::SweepError;
use crate::modules::store::cookies::expiry_assignment;
use crate::modules::store::{BrowserStore, CookieJar};

/// 将当前可见的 Cookie 全部改写为立即过期
pub fn expire_cookies(store: &mut dyn BrowserStore) -> Result<usize, SweepError> {
    let visible = store.live_cookies()?;

    for cookie in &visible {
        store.assign_cookie(&expiry_assignment(cookie))?;
    }

    tracing::info!("已清理 Cookies: {} 项", visible.len());
    Ok(visible.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::{CookieJar, MemoryStore};

    #[test]
    fn every_visible_cookie_ends_up_expired() {
        let mut store = MemoryStore::new();
        assert!(store.assign_cookie("sid=abc").is_ok());
        assert!(store.assign_cookie("theme=dark").is_ok());
        assert!(store.assign_cookie("doc=1; path=/docs").is_ok());

        assert_eq!(expire_cookies(&mut store).unwrap_or(0), 3);
        assert!(store.cookie_string().unwrap_or_default().is_empty());

        let cookies = store.cookies().unwrap_or_default();
        assert_eq!(cookies.len(), 3);
        assert!(cookies
            .iter()
            .all(|c| c.expires.map(|e| e.timestamp()) == Some(0) && c.value.is_empty()));
    }

    #[test]
    fn empty_jar_is_a_no_op() {
        let mut store = MemoryStore::new();
        assert_eq!(expire_cookies(&mut store).unwrap_or(usize::MAX), 0);
    }
}
