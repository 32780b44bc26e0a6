//! SAMP 编解码错误类型

use thiserror::Error;

/// 错误信息中保留的引导行最大长度
const MAX_REPORTED_LINE: usize = 128;

/// SAMP 编解码错误
///
/// 协议层面只有一种硬性失败：引导行不符合语法。
/// 其余不规范输入（无法识别的头部行、重复头部等）都会被静默吸收。
#[derive(Debug, Error)]
pub enum SampError {
    /// 引导行不符合 `SAMP/<version> <KIND>[/<status>] <action>` 语法
    #[error("Invalid SAMP frame: malformed intro line {line:?}")]
    MalformedMessage {
        /// 出错的引导行（有损解码，超长时截断）
        line: String,
    },

    /// 读取输入流时发生的 I/O 错误
    #[error("I/O error while reading SAMP message: {0}")]
    Io(#[from] std::io::Error),
}

impl SampError {
    /// 根据原始引导行字节构造 `MalformedMessage`
    pub(crate) fn malformed(line: &[u8]) -> Self {
        let mut line = String::from_utf8_lossy(line).into_owned();
        if line.len() > MAX_REPORTED_LINE {
            let mut end = MAX_REPORTED_LINE;
            while !line.is_char_boundary(end) {
                end -= 1;
            }
            line.truncate(end);
            line.push('…');
        }
        Self::MalformedMessage { line }
    }

    /// 是否为协议格式错误（而非 I/O 错误）
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedMessage { .. })
    }
}

/// SAMP 操作的结果类型
pub type Result<T> = std::result::Result<T, SampError>;
