use triage_engine::traits::ModelCompletion;

#[derive(Clone)]
pub struct OpenAiCompatibleReplyModel {
    api_key: String,
}

impl std::fmt::Debug for OpenAiCompatibleReplyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleReplyModel")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiCompatibleReplyModel {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl triage_engine::traits::ReplyModel for OpenAiCompatibleReplyModel {
    async fn complete(
        &self,
        base_url: &str,
        _api_key: &str,
        model: &str,
        system_message: &str,
        user_message: &str,
    ) -> anyhow::Result<ModelCompletion> {
        let cfg = triage_providers::openai_compatible::OpenAiCompatibleChatConfig {
            base_url: base_url.to_string(),
            api_key: self.api_key.clone(),
            model: model.to_string(),
        };

        let messages = vec![
            triage_providers::openai_compatible::ChatMessage {
                role: "system".into(),
                content: system_message.to_string(),
            },
            triage_providers::openai_compatible::ChatMessage {
                role: "user".into(),
                content: user_message.to_string(),
            },
        ];

        let req = triage_providers::openai_compatible::build_chat_completions_request(
            &cfg, &messages,
        );
        let resp = triage_providers::runtime::execute(&req).await?;

        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!(
                "chat completion request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            ));
        }

        let text = triage_providers::parse::parse_openai_chat_completion(&resp.body)?;
        Ok(ModelCompletion {
            text,
            provider: "openai-compatible".into(),
            model: model.into(),
        })
    }
}
