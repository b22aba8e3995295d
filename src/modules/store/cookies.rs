//! Cookie 模型与 `name=value; expires=...; path=/` 形式的解析

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::modules::common::error::SweepError;

/// Unix 纪元，写入该过期时间即删除 Cookie
pub const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_string(),
            expires: None,
        }
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// 没有过期时间的视为会话 Cookie，永不过期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.map(|e| e <= now).unwrap_or(false)
    }
}

/// `name=value` 片段，两侧空白不计入
///
/// 模式为常量，编译失败只可能是代码错误
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^=]*?)\s*=\s*(.*?)\s*$").expect("cookie pair pattern is a valid regex")
});

/// 解析一条 Cookie 赋值语句
pub fn parse_assignment(assignment: &str) -> Result<Cookie, SweepError> {
    let mut segments = assignment.split(';');
    let first = segments.next().unwrap_or_default();

    let (name, value) = match PAIR_RE.captures(first) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (first.trim().to_string(), String::new()),
    };

    if name.is_empty() {
        return Err(SweepError::InvalidInput(format!(
            "Cookie 缺少名称: {}",
            assignment
        )));
    }

    let mut cookie = Cookie::new(name, value);

    for attribute in segments {
        let Some(caps) = PAIR_RE.captures(attribute) else {
            continue;
        };
        match caps[1].to_lowercase().as_str() {
            "expires" => {
                cookie.expires = Some(parse_http_date(&caps[2]).ok_or_else(|| {
                    SweepError::InvalidInput(format!("无法解析过期时间: {}", &caps[2]))
                })?);
            }
            "path" if !caps[2].is_empty() => cookie.path = caps[2].to_string(),
            _ => {}
        }
    }

    Ok(cookie)
}

/// 让指定 Cookie 立即过期的赋值语句（保留原路径）
pub fn expiry_assignment(cookie: &Cookie) -> String {
    format!("{}=;expires={};path={}", cookie.name, EPOCH_EXPIRY, cookie.path)
}

pub fn format_http_date(timestamp: &DateTime<Utc>) -> String {
    format!("{} GMT", timestamp.format(HTTP_DATE_FORMAT))
}

/// 支持 GMT / UTC 两种后缀
pub fn parse_http_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let body = raw
        .strip_suffix(" GMT")
        .or_else(|| raw.strip_suffix(" UTC"))
        .unwrap_or(raw);
    NaiveDateTime::parse_from_str(body, HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
