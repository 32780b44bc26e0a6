//! Axum框架的SAMP集成
//!
//! - [`Message`] 可以直接作为 handler 参数，从请求体解析得到
//! - [`MessageBuilder`] 和 [`Message`] 可以直接作为响应返回

use crate::{
    builder::MessageBuilder, error::SampError, message::Message, protocol::FailureStatus,
    CORRELATION_ID_HEADER,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::Instrument;

/// SAMP 消息的 HTTP 内容类型
pub const SAMP_CONTENT_TYPE: &str = "application/samp";

/// 格式错误时返回的 `FAILURE` 消息使用的动作
const REJECTION_ACTION: &str = "/";

/// 提取 [`Message`] 失败时的拒绝类型
#[derive(Debug, thiserror::Error)]
pub enum SampRejection {
    /// 读取请求体失败
    #[error(transparent)]
    Body(#[from] BytesRejection),
    /// 请求体不是合法的 SAMP 消息
    #[error(transparent)]
    Malformed(#[from] SampError),
}

impl IntoResponse for SampRejection {
    fn into_response(self) -> Response {
        match self {
            SampRejection::Body(rejection) => rejection.into_response(),
            SampRejection::Malformed(err) => {
                tracing::warn!(error = %err, "Rejecting malformed SAMP request");
                let failure = MessageBuilder::new()
                    .failure(FailureStatus::BadRequest)
                    .with_action(REJECTION_ACTION)
                    .with_body(err.to_string());
                (StatusCode::BAD_REQUEST, samp_response(failure.format())).into_response()
            }
        }
    }
}

/// 从请求体解析 SAMP 消息
///
/// # 示例
/// ```no_run
/// use axum::{routing::post, Router};
/// use samp::{Message, MessageBuilder};
///
/// async fn my_handler(message: Message) -> MessageBuilder {
///     tracing::info!(action = %message.action(), "Handler started");
///     samp::response(&message).with_body("ok")
/// }
///
/// let app: Router = Router::new().route("/samp", post(my_handler));
/// ```
impl<S> FromRequest<S> for Message
where
    S: Send + Sync,
{
    type Rejection = SampRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let span = tracing::info_span!(
            "samp_request",
            method = %req.method(),
            uri = %req.uri()
        );

        async move {
            let body = Bytes::from_request(req, state).await?;
            let message = crate::parse(&body)?;
            tracing::debug!(
                action = %message.action(),
                kind = %message.kind(),
                correlation_id = message.header(CORRELATION_ID_HEADER),
                "Extracted SAMP message"
            );
            Ok::<_, SampRejection>(message)
        }
        .instrument(span)
        .await
    }
}

impl IntoResponse for MessageBuilder {
    fn into_response(self) -> Response {
        samp_response(self.format())
    }
}

impl IntoResponse for Message {
    fn into_response(self) -> Response {
        samp_response(self.to_bytes())
    }
}

fn samp_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, SAMP_CONTENT_TYPE)], bytes).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt;

    async fn handler(message: Message) -> MessageBuilder {
        crate::response_with_trace_path(&message, "kitchen").with_body("done")
    }

    async fn echo(message: Message) -> Message {
        message
    }

    fn app() -> Router {
        Router::new()
            .route("/samp", post(handler))
            .route("/echo", post(echo))
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_flow() {
        let request = Request::builder()
            .method("POST")
            .uri("/samp")
            .body(Body::from(
                "SAMP/1.0 EVENT /make/lunch\nCorrelation-Id: c-1\nTrace: api-gateway\n\nburger",
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            SAMP_CONTENT_TYPE
        );
        assert_eq!(
            &body_bytes(response).await[..],
            b"SAMP/1.0 EVENT /make/lunch\nCorrelation-Id: c-1\nTrace: api-gateway...kitchen\n\ndone"
        );
    }

    #[tokio::test]
    async fn test_echo_message_response() {
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("SAMP/1.0 FAILURE/Timeout /slow\nFrom: bob\n\n"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            &body_bytes(response).await[..],
            b"SAMP/1.0 FAILURE/Timeout /slow\nFrom: bob\n\n"
        );
    }

    #[tokio::test]
    async fn test_malformed_request_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/samp")
            .body(Body::from("GET / HTTP/1.1\n\n"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let failure = crate::parse(&body_bytes(response).await).unwrap();
        assert_eq!(failure.kind(), crate::Kind::Failure);
        assert_eq!(failure.status(), Some("Bad-Request"));
        assert_eq!(failure.action(), "/");
        let body = String::from_utf8(failure.body().unwrap().to_vec()).unwrap();
        assert!(body.contains("malformed intro line"));
    }
}
