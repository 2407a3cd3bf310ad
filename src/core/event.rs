/// 消息事件，包含平台、发送者与消息内容
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// 平台名称 (如 "console", "onebot_v11")
    pub platform: String,
    /// 发送者 ID
    pub sender_id: Option<String>,
    /// 消息文本 (已去掉命令前缀)
    pub message: String,
}

impl MessageEvent {
    pub fn new(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            sender_id: None,
            message: message.into(),
        }
    }

    pub fn sender_id(mut self, id: impl Into<String>) -> Self {
        self.sender_id = Some(id.into());
        self
    }

    /// Wrap `text` as a plain-text reply to this event.
    pub fn plain_result(&self, text: impl Into<String>) -> MessageEventResult {
        MessageEventResult { text: text.into() }
    }
}

/// A plain-text reply yielded back to the host transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEventResult {
    text: String,
}

impl MessageEventResult {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
