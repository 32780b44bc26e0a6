//! 可变的流式消息构建器

use crate::message::Message;
use crate::protocol::Kind;
use crate::{formatter, CORRELATION_ID_HEADER};
use std::collections::BTreeMap;

/// SAMP 消息构建器
///
/// 默认值：类别为 `EVENT`，无状态、无动作、无头部、无正文。
/// 每个 `with_*` 方法按值接收并返回构建器，便于链式调用；
/// [`format`](Self::format) 和 [`build`](Self::build) 只借用构建器，可重复调用。
///
/// # 示例
/// ```
/// use samp::{FailureStatus, MessageBuilder};
///
/// let bytes = MessageBuilder::new()
///     .failure(FailureStatus::BadRequest)
///     .with_action("/foo/bar")
///     .with_body("baz")
///     .format();
/// assert_eq!(bytes, b"SAMP/1.0 FAILURE/Bad-Request /foo/bar\n\nbaz");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBuilder {
    kind: Kind,
    status: Option<String>,
    action: Option<String>,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl MessageBuilder {
    /// 创建使用默认值的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设为 `EVENT`，清除状态
    pub fn event(mut self) -> Self {
        self.kind = Kind::Event;
        self.status = None;
        self
    }

    /// 设为带状态的 `EVENT`
    pub fn event_with_status(mut self, status: impl Into<String>) -> Self {
        self.kind = Kind::Event;
        self.status = Some(status.into());
        self
    }

    /// 设为带状态的 `FAILURE`
    pub fn failure(mut self, status: impl Into<String>) -> Self {
        self.kind = Kind::Failure;
        self.status = Some(status.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 设置单个头部，同名头部会被覆盖
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// 批量合并头部，同名头部会被覆盖
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 设置 `Correlation-Id` 头部
    pub fn with_correlation_id(self, id: impl Into<String>) -> Self {
        self.with_header(CORRELATION_ID_HEADER, id)
    }

    /// 设置正文；字符串按 UTF-8 编码
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// 将当前字段冻结为不可变的 [`Message`]
    ///
    /// 未设置动作时使用空字符串；这样的消息无法被其他服务解析。
    pub fn build(&self) -> Message {
        let action = match &self.action {
            Some(action) => action.clone(),
            None => {
                tracing::warn!(
                    kind = %self.kind,
                    "Building SAMP message without an action; peers will reject it"
                );
                String::new()
            }
        };
        Message::new(
            formatter::SAMP_VERSION.to_string(),
            self.kind,
            self.status.clone(),
            action,
            self.headers.clone(),
            self.body.clone(),
        )
    }

    /// 格式化为线上字节，不改变构建器状态
    pub fn format(&self) -> Vec<u8> {
        formatter::format_message(&self.build())
    }
}

impl From<MessageBuilder> for Message {
    fn from(builder: MessageBuilder) -> Self {
        builder.build()
    }
}
