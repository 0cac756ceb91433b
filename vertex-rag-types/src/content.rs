use serde::{Deserialize, Serialize};

/// 对话内容。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 角色：user/model。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 消息内容片段。
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// 创建用户文本消息。
    pub fn user(text: impl Into<String>) -> Self {
        Self::from_text(text, Role::User)
    }

    /// 创建模型文本消息。
    pub fn model(text: impl Into<String>) -> Self {
        Self::from_text(text, Role::Model)
    }

    /// 提取第一段文本。
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| part.text.as_deref())
    }

    fn from_text(text: impl Into<String>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }
}

/// 内容角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 内容部分。非文本字段不在此建模，反序列化时忽略。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 是否为思考内容。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// 文本片段。
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}
