use chrono::{DateTime, Local, Utc};

/// 格式化 MB 数值
pub fn format_size_mb(size_mb: u64) -> String {
    if size_mb >= 1024 {
        format!("{:.2} GB", size_mb as f64 / 1024.0)
    } else {
        format!("{} MB", size_mb)
    }
}

/// 转为本地时间显示
pub fn format_local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// 生成唯一 ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 截断字符串（按字符边界，兼容中文）
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let chars: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", chars)
    } else {
        s.to_string()
    }
}
