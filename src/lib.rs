//! SAMP 消息编解码
//!
//! SAMP 是一种紧凑、可读、按行组织的服务间异步消息协议。
//! 本库负责线上格式的解析与生成，以及让消息能在服务链路中关联、转发的
//! 追踪路径和响应派生规则。核心功能与传输层无关，并为Axum提供了开箱即用的集成。
//!
//! ```text
//! SAMP/1.0 EVENT/Ok /make/lunch
//! Correlation-Id: a54d3200-d8c5-4ef2-8514-0e3f9e0533e9
//! Trace: api-gateway...menud...order-placement
//!
//! {"product":"burger"}
//! ```
//!
//! ## Usage
//!
//! ### 基础用法：解析与构建
//! ```
//! use samp::{EventStatus, MessageBuilder, TRACE_HEADER};
//!
//! let message = samp::parse_str(
//!     "SAMP/1.0 EVENT /make/lunch\nTrace: api-gateway...menud\n\n{\"product\":\"burger\"}",
//! )?;
//! assert_eq!(message.action(), "/make/lunch");
//! assert_eq!(message.trace_paths(), vec!["api-gateway", "menud"]);
//!
//! let bytes = MessageBuilder::new()
//!     .event_with_status(EventStatus::Accepted)
//!     .with_action("/make/lunch")
//!     .with_header(TRACE_HEADER, samp::format_trace_paths(["kitchen"]))
//!     .format();
//! assert_eq!(bytes, b"SAMP/1.0 EVENT/Accepted /make/lunch\nTrace: kitchen\n\n");
//! # Ok::<(), samp::SampError>(())
//! ```
//!
//! ### 派生响应
//! ```
//! let request = samp::parse_str(
//!     "SAMP/1.0 EVENT /make/lunch\nCorrelation-Id: 42\nTrace: api-gateway\n\n",
//! )?;
//! let reply = samp::response_with_trace_path(&request, "kitchen").with_body("done");
//! assert_eq!(
//!     reply.format(),
//!     b"SAMP/1.0 EVENT /make/lunch\nCorrelation-Id: 42\nTrace: api-gateway...kitchen\n\ndone"
//! );
//! # Ok::<(), samp::SampError>(())
//! ```
//!
//! ### Axum 集成（需要启用 axum feature）
//! ```ignore
//! use axum::{routing::post, Router};
//! use samp::{Message, MessageBuilder};
//!
//! async fn handler(message: Message) -> MessageBuilder {
//!     samp::response_with_trace_path(&message, "kitchen").with_body("done")
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new().route("/samp", post(handler));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

mod builder;
mod correlation;
mod error;
mod formatter;
mod message;
mod parser;
mod protocol;
mod response;
mod trace_path;

pub use builder::MessageBuilder;
pub use correlation::CorrelationId;
pub use error::{Result, SampError};
pub use formatter::{format, format_message, write_message, write_message_async, SAMP_VERSION};
pub use message::Message;
pub use parser::{
    parse, parse_async, parse_reader, parse_str, LineTerminator, Parser, ParserConfig,
};
pub use protocol::{EventStatus, FailureStatus, Kind};
pub use response::{response, response_with_trace_path, UNKNOWN_TRACE_PATH};
pub use trace_path::{append_trace_path, format_trace_paths, trace_paths, TRACE_PATH_DELIMITER};

// 约定的头部名称；编解码器不会据此校验头部

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// 会话关联ID，响应派生时原样传播
pub const CORRELATION_ID_HEADER: &str = "Correlation-Id";
pub const DATE_HEADER: &str = "Date";
/// 会话发起方，响应派生时原样传播
pub const FROM_HEADER: &str = "From";
/// 追踪路径，见 [`format_trace_paths`]
pub const TRACE_HEADER: &str = "Trace";
pub const PAYLOAD_HEADER: &str = "Payload";

// -- axum feature --
#[cfg(feature = "axum")]
mod integrations;
#[cfg(feature = "axum")]
pub use integrations::axum::{SampRejection, SAMP_CONTENT_TYPE};
