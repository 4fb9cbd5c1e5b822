//! # 时长格式化
//!
//! 将时长格式化为调度器指令使用的 `HH:MM:SS`。小时不回绕。

use std::time::Duration;

/// 四舍五入到整秒后格式化为 `HH:MM:SS`
pub fn format_duration(duration: Duration) -> String {
    let mut total = duration.as_secs();
    if duration.subsec_nanos() >= 500_000_000 {
        total = total.saturating_add(1);
    }
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
