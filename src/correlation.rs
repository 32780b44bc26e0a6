//! 关联ID生成
//!
//! SAMP 把 `Correlation-Id` 视为不透明字符串，只负责原样传播。
//! 这里提供一个生成器，供发起新会话的服务使用。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// 机器ID，基于进程ID和启动时间戳生成，避免不同进程生成相同的ID
static MACHINE_ID: LazyLock<u16> = LazyLock::new(|| {
    let pid = std::process::id();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as u32;
    ((pid ^ timestamp) & 0xFFFF) as u16
});

/// 关联ID
///
/// 格式为 `8-4-4-4-12` 的小写十六进制（与 UUID 外观一致，共 36 个字符），
/// 由毫秒时间戳(48位) + 机器ID(16位) + 计数器(32位) + 随机数(32位) 组成。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// 生成新的关联ID
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        let random_part = fastrand::u32(..);

        let high_64 = ((timestamp & 0xFFFF_FFFF_FFFF) << 16) | (*MACHINE_ID as u64);
        let low_64 = ((counter & 0xFFFF_FFFF) << 32) | (random_part as u64);

        let hex = format!("{high_64:016x}{low_64:016x}");
        Self(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
