/// 浏览历史需要宿主环境授予的权限，这里只记录日志
pub fn clear_browsing_history() -> usize {
    tracing::info!("清理浏览历史（宿主未授予权限，跳过）");
    0
}
