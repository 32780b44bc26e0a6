//! 根据已有消息派生响应
//!
//! 只传播会话级头部（`Correlation-Id`、`From`、`Trace`）；
//! `Content-Type`、`Date` 等逐跳头部不会被复制。

use crate::builder::MessageBuilder;
use crate::message::Message;
use crate::trace_path::append_trace_path;
use crate::{CORRELATION_ID_HEADER, FROM_HEADER, TRACE_HEADER};

/// 未指定路径段时追加的占位符
pub const UNKNOWN_TRACE_PATH: &str = "?";

/// 创建响应构建器，复制源消息的动作与关联头部
///
/// 源消息带有 `Trace` 头部时追加占位符 `?`。
pub fn response(message: &Message) -> MessageBuilder {
    derive(message, None)
}

/// 创建响应构建器，并把 `segment` 追加（或设置）到 `Trace` 头部
pub fn response_with_trace_path(message: &Message, segment: &str) -> MessageBuilder {
    derive(message, Some(segment))
}

fn derive(message: &Message, segment: Option<&str>) -> MessageBuilder {
    let mut builder = MessageBuilder::new()
        .event()
        .with_action(message.action());

    for name in [CORRELATION_ID_HEADER, FROM_HEADER] {
        if let Some(value) = message.header(name) {
            builder = builder.with_header(name, value);
        }
    }

    let trace = match (message.header(TRACE_HEADER), segment) {
        (Some(trace), segment) => Some(append_trace_path(
            trace,
            segment.unwrap_or(UNKNOWN_TRACE_PATH),
        )),
        (None, Some(segment)) => Some(segment.to_string()),
        (None, None) => None,
    };
    if let Some(trace) = trace {
        builder = builder.with_header(TRACE_HEADER, trace);
    }

    tracing::debug!(
        action = %message.action(),
        correlation_id = message.header(CORRELATION_ID_HEADER),
        trace = builder.header(TRACE_HEADER),
        "Derived SAMP response"
    );
    builder
}
