//! # Error 模块
//!
//! 定义 animated-value 中使用的错误类型。
//!
//! 所有校验都发生在状态修改之前：返回错误的调用不会留下部分修改。

use thiserror::Error;

/// 动画值错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    /// 参数类型或取值范围不合法
    #[error("参数 '{name}' 无效：{message}")]
    InvalidArgument { name: &'static str, message: String },

    /// 配置文档无法解析
    #[error("配置解析失败: {0}")]
    InvalidConfig(String),
}

impl AnimError {
    /// 创建参数错误
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AnimError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result 类型别名
pub type AnimResult<T> = Result<T, AnimError>;
