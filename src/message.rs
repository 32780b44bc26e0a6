//! 不可变的 SAMP 消息

use crate::protocol::Kind;
use std::collections::BTreeMap;

/// 解析得到（或由构建器冻结得到）的 SAMP 消息
///
/// 构造后不可修改。头部按名称排序存储，名称大小写敏感。
/// `body` 为 `None` 表示消息没有正文段，与空正文 `Some(vec![])` 不同。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    version: String,
    kind: Kind,
    status: Option<String>,
    action: String,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Message {
    pub(crate) fn new(
        version: String,
        kind: Kind,
        status: Option<String>,
        action: String,
        headers: BTreeMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            version,
            kind,
            status,
            action,
            headers,
            body,
        }
    }

    /// 协议版本，例如 `"1.0"`
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// 全部头部，按名称升序
    #[inline]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// 按名称（大小写敏感）获取单个头部值
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[inline]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// `Trace` 头部中的路径段，见 [`crate::trace_paths`]
    pub fn trace_paths(&self) -> Vec<&str> {
        crate::trace_path::trace_paths(self)
    }

    /// 将消息格式化为线上字节
    ///
    /// 版本号固定输出为 `1.0`，与解析时读到的版本无关。
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::formatter::format_message(self)
    }
}
