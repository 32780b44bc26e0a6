//! SAMP 消息解析
//!
//! 单次前向扫描，逐行读取输入，不要求一次性缓冲整个消息。
//! 同步（`BufRead`）与异步（`AsyncBufRead`）两种读取方式共用同一个逐行状态机。

use crate::error::{Result, SampError};
use crate::message::Message;
use crate::protocol::Kind;
use std::collections::BTreeMap;
use std::io::{BufRead, Read};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// 正文每行追加的换行符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineTerminator {
    #[inline]
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::CrLf => b"\r\n",
        }
    }
}

/// 解析器配置选项
#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    /// 重组正文时每行追加的换行符（默认 `\n`）
    pub body_line_terminator: LineTerminator,
    /// 是否原样保留空行之后的正文字节（默认关闭）
    ///
    /// 关闭时正文按行重组，结果总是以恰好一个换行符结尾，
    /// 与现有服务的行为保持兼容。
    pub raw_body: bool,
}

/// SAMP 解析器
///
/// 持有解析配置，可在多个线程间共享使用。
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// 使用默认配置创建解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建解析器
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 解析内存中的原始字节
    pub fn parse(&self, raw: &[u8]) -> Result<Message> {
        self.parse_reader(raw)
    }

    /// 解析字符串
    pub fn parse_str(&self, raw: &str) -> Result<Message> {
        self.parse(raw.as_bytes())
    }

    /// 从同步输入流逐行解析，一直读到流结束
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<Message> {
        let mut line = Vec::new();
        if !read_line(&mut reader, &mut line)? {
            return Err(SampError::malformed(&line));
        }
        let mut assembler = Assembler::start(&self.config, &line)?;
        loop {
            if assembler.wants_raw_body() {
                let mut rest = Vec::new();
                reader.read_to_end(&mut rest)?;
                assembler.set_raw_body(rest);
                break;
            }
            if !read_line(&mut reader, &mut line)? {
                break;
            }
            assembler.push_line(&line);
        }
        Ok(assembler.finish())
    }

    /// 从异步输入流逐行解析，一直读到流结束
    pub async fn parse_async<R>(&self, mut reader: R) -> Result<Message>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = Vec::new();
        if !read_line_async(&mut reader, &mut line).await? {
            return Err(SampError::malformed(&line));
        }
        let mut assembler = Assembler::start(&self.config, &line)?;
        loop {
            if assembler.wants_raw_body() {
                let mut rest = Vec::new();
                reader.read_to_end(&mut rest).await?;
                assembler.set_raw_body(rest);
                break;
            }
            if !read_line_async(&mut reader, &mut line).await? {
                break;
            }
            assembler.push_line(&line);
        }
        Ok(assembler.finish())
    }
}

/// 使用默认配置解析原始字节
pub fn parse(raw: &[u8]) -> Result<Message> {
    Parser::new().parse(raw)
}

/// 使用默认配置解析字符串
pub fn parse_str(raw: &str) -> Result<Message> {
    Parser::new().parse_str(raw)
}

/// 使用默认配置从同步输入流解析
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Message> {
    Parser::new().parse_reader(reader)
}

/// 使用默认配置从异步输入流解析
pub async fn parse_async<R>(reader: R) -> Result<Message>
where
    R: AsyncBufRead + Unpin,
{
    Parser::new().parse_async(reader).await
}

/// 读取一行到 `buf`（去掉 `\n` 或 `\r\n`），流结束时返回 false
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    strip_terminator(buf);
    Ok(true)
}

async fn read_line_async<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(false);
    }
    strip_terminator(buf);
    Ok(true)
}

#[inline]
fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

/// 引导行：`SAMP/<version> <KIND>[/<status>] <action>`
#[derive(Debug, PartialEq, Eq)]
struct Intro {
    version: String,
    kind: Kind,
    status: Option<String>,
    action: String,
}

impl Intro {
    fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("SAMP/")?;

        let (version, rest) = split_while(rest, |c| c.is_ascii_digit() || c == '.');
        let rest = skip_whitespace(rest)?;

        let (kind, rest) = split_while(rest, |c| c.is_ascii_alphabetic());
        let kind = Kind::from_token(kind)?;

        let (status, rest) = match rest.strip_prefix('/') {
            Some(rest) => {
                let (status, rest) =
                    split_while(rest, |c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                (Some(status.to_string()), rest)
            }
            None => (None, rest),
        };
        let action = skip_whitespace(rest)?;

        if version.is_empty() || status.as_deref() == Some("") || action.is_empty() {
            return None;
        }
        Some(Self {
            version: version.to_string(),
            kind,
            status,
            action: action.to_string(),
        })
    }
}

/// 解析头部行 `<name>:\s+<value>`，名称取第一个冒号之前的部分
fn parse_header(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = line.split_once(':')?;
    if name.is_empty() {
        return None;
    }
    Some((name, skip_whitespace(rest)?))
}

fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// 跳过至少一个空白字符；没有空白时返回 None
fn skip_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    (trimmed.len() < s.len()).then_some(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Headers,
    Body,
}

/// 逐行组装消息的状态机
struct Assembler<'c> {
    config: &'c ParserConfig,
    intro: Intro,
    headers: BTreeMap<String, String>,
    phase: Phase,
    raw_taken: bool,
    body: Option<Vec<u8>>,
}

impl<'c> Assembler<'c> {
    fn start(config: &'c ParserConfig, intro_line: &[u8]) -> Result<Self> {
        let intro = std::str::from_utf8(intro_line)
            .ok()
            .and_then(Intro::parse)
            .ok_or_else(|| SampError::malformed(intro_line))?;
        Ok(Self {
            config,
            intro,
            headers: BTreeMap::new(),
            phase: Phase::Headers,
            raw_taken: false,
            body: None,
        })
    }

    /// 头部已结束且配置为原样保留正文，调用方应直接读取剩余字节
    fn wants_raw_body(&self) -> bool {
        self.config.raw_body && self.phase == Phase::Body && !self.raw_taken
    }

    fn set_raw_body(&mut self, rest: Vec<u8>) {
        self.raw_taken = true;
        if !rest.is_empty() {
            self.body = Some(rest);
        }
    }

    fn push_line(&mut self, line: &[u8]) {
        match self.phase {
            Phase::Headers if line.is_empty() => self.phase = Phase::Body,
            Phase::Headers => {
                match std::str::from_utf8(line).ok().and_then(parse_header) {
                    Some((name, value)) => {
                        self.headers.insert(name.to_string(), value.to_string());
                    }
                    None => {
                        tracing::warn!(
                            action = %self.intro.action,
                            line = %String::from_utf8_lossy(line),
                            "Dropping unparseable SAMP header line"
                        );
                    }
                }
            }
            Phase::Body => {
                let body = self.body.get_or_insert_with(Vec::new);
                body.extend_from_slice(line);
                body.extend_from_slice(self.config.body_line_terminator.as_bytes());
            }
        }
    }

    fn finish(self) -> Message {
        let Intro {
            version,
            kind,
            status,
            action,
        } = self.intro;
        tracing::debug!(
            action = %action,
            kind = %kind,
            headers = self.headers.len(),
            body_len = self.body.as_ref().map(Vec::len),
            "Parsed SAMP message"
        );
        Message::new(version, kind, status, action, self.headers, self.body)
    }
}
