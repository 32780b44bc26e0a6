//! 追踪路径工具
//!
//! `Trace` 头部记录消息经过的各个节点，节点之间用 `...` 分隔。
//! 节点名本身可能包含单个点（例如主机名），因此分隔符是三个点。

use crate::message::Message;
use crate::TRACE_HEADER;

/// 追踪路径段分隔符
pub const TRACE_PATH_DELIMITER: &str = "...";

/// 将路径段拼接为 `Trace` 头部值
///
/// ```
/// assert_eq!(samp::format_trace_paths(["a", "b", "c"]), "a...b...c");
/// ```
pub fn format_trace_paths<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push_str(TRACE_PATH_DELIMITER);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// 在已有的 `Trace` 头部值后追加一个路径段
#[inline]
pub fn append_trace_path(trace: &str, segment: &str) -> String {
    format!("{trace}{TRACE_PATH_DELIMITER}{segment}")
}

/// 拆分消息 `Trace` 头部中的路径段
///
/// 没有 `Trace` 头部（或值为空）时返回空序列。
pub fn trace_paths(message: &Message) -> Vec<&str> {
    match message.header(TRACE_HEADER) {
        Some(trace) if !trace.is_empty() => trace.split(TRACE_PATH_DELIMITER).collect(),
        _ => Vec::new(),
    }
}
