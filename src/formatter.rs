//! SAMP 消息格式化
//!
//! 输出布局（逐字节固定）：
//!
//! ```text
//! SAMP/1.0 <KIND>[/<status>] <action>\n
//! <name>: <value>\n        （按名称升序）
//! \n
//! <body>                    （原样输出，不增减换行）
//! ```

use crate::message::Message;
use crate::protocol::Kind;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// 输出使用的协议版本，与输入消息的版本无关
pub const SAMP_VERSION: &str = "1.0";

const INTRO_PREFIX: &[u8] = b"SAMP/1.0 ";

/// 按给定字段格式化一条 SAMP 消息
///
/// 头部可以是任意名称/值对序列（`HashMap`、`BTreeMap`、元组切片等），
/// 输出时总是按名称的字节序升序排列；同名头部以最后出现的为准。
///
/// # 示例
/// ```
/// use samp::{format, FailureStatus, Kind};
///
/// let bytes = format(
///     Kind::Failure,
///     Some(FailureStatus::BadRequest.as_str()),
///     "/foo/bar",
///     std::iter::empty::<(&str, &str)>(),
///     Some(b"baz".as_slice()),
/// );
/// assert_eq!(bytes, b"SAMP/1.0 FAILURE/Bad-Request /foo/bar\n\nbaz");
/// ```
pub fn format<I, K, V>(
    kind: Kind,
    status: Option<&str>,
    action: &str,
    headers: I,
    body: Option<&[u8]>,
) -> Vec<u8>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut headers: Vec<(K, V)> = headers.into_iter().collect();
    // 稳定排序：同名头部保持插入顺序，便于下面取最后一个
    headers.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    let header_len: usize = headers
        .iter()
        .map(|(k, v)| k.as_ref().len() + v.as_ref().len() + 3)
        .sum();
    let mut out = Vec::with_capacity(
        INTRO_PREFIX.len()
            + kind.as_str().len()
            + status.map_or(0, |s| s.len() + 1)
            + action.len()
            + 2
            + header_len
            + 1
            + body.map_or(0, <[u8]>::len),
    );

    out.extend_from_slice(INTRO_PREFIX);
    out.extend_from_slice(kind.as_str().as_bytes());
    if let Some(status) = status {
        out.push(b'/');
        out.extend_from_slice(status.as_bytes());
    }
    out.push(b' ');
    out.extend_from_slice(action.as_bytes());
    out.push(b'\n');

    for (i, (name, value)) in headers.iter().enumerate() {
        let shadowed = headers
            .get(i + 1)
            .is_some_and(|(next, _)| next.as_ref() == name.as_ref());
        if shadowed {
            continue;
        }
        out.extend_from_slice(name.as_ref().as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_ref().as_bytes());
        out.push(b'\n');
    }
    out.push(b'\n');

    if let Some(body) = body {
        out.extend_from_slice(body);
    }
    out
}

/// 格式化一条已有的消息
pub fn format_message(message: &Message) -> Vec<u8> {
    format(
        message.kind(),
        message.status(),
        message.action(),
        message.headers(),
        message.body(),
    )
}

/// 将消息写入同步输出流
pub fn write_message<W: io::Write>(writer: &mut W, message: &Message) -> io::Result<()> {
    writer.write_all(&format_message(message))
}

/// 将消息写入异步输出流
pub async fn write_message_async<W>(writer: &mut W, message: &Message) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&format_message(message)).await
}
