//! 协议词汇：消息类别与约定状态值
//!
//! 状态值只是约定俗成的常量，编解码器本身不会校验它们。

use std::fmt;

/// 消息类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// 通知类消息（`EVENT`）
    #[default]
    Event,
    /// 错误响应（`FAILURE`）
    Failure,
}

impl Kind {
    /// 线上格式的类别标记
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Event => "EVENT",
            Kind::Failure => "FAILURE",
        }
    }

    /// 从线上标记解析类别，大小写敏感
    #[inline]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EVENT" => Some(Kind::Event),
            "FAILURE" => Some(Kind::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `EVENT` 消息的约定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Ok,
    Accepted,
    NoContent,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Ok => "Ok",
            EventStatus::Accepted => "Accepted",
            EventStatus::NoContent => "No-Content",
        }
    }
}

/// `FAILURE` 消息的约定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStatus {
    BadRequest,
    InternalError,
    NotFound,
    /// 线上拼写为 `Forbidded`，与现有服务保持一致
    Forbidded,
    Unauthorized,
    Timeout,
}

impl FailureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStatus::BadRequest => "Bad-Request",
            FailureStatus::InternalError => "Internal-Error",
            FailureStatus::NotFound => "Not-Found",
            FailureStatus::Forbidded => "Forbidded",
            FailureStatus::Unauthorized => "Unauthorized",
            FailureStatus::Timeout => "Timeout",
        }
    }
}

macro_rules! status_conversions {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl From<$ty> for String {
                fn from(status: $ty) -> Self {
                    status.as_str().to_string()
                }
            }
        )*
    };
}

status_conversions!(EventStatus, FailureStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tokens() {
        assert_eq!(Kind::Event.as_str(), "EVENT");
        assert_eq!(Kind::Failure.to_string(), "FAILURE");
        assert_eq!(Kind::from_token("EVENT"), Some(Kind::Event));
        assert_eq!(Kind::from_token("FAILURE"), Some(Kind::Failure));
        // 大小写敏感
        assert_eq!(Kind::from_token("event"), None);
        assert_eq!(Kind::from_token("NOTICE"), None);
        assert_eq!(Kind::default(), Kind::Event);
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(EventStatus::NoContent.as_str(), "No-Content");
        assert_eq!(String::from(EventStatus::Ok), "Ok");
        assert_eq!(FailureStatus::BadRequest.to_string(), "Bad-Request");
        assert_eq!(FailureStatus::InternalError.as_ref(), "Internal-Error");
        assert_eq!(FailureStatus::Forbidded.as_str(), "Forbidded");
    }
}
