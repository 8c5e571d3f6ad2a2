//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::TtsProviderPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::Voice;

/// ListVoices Handler
///
/// 直接返回适配器规范化后的目录，不做二次排序
pub struct ListVoicesHandler {
    provider: Arc<dyn TtsProviderPort>,
}

impl ListVoicesHandler {
    pub fn new(provider: Arc<dyn TtsProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: ListVoices) -> Result<Vec<Voice>, ApplicationError> {
        let filter = query.filter();
        let voices = self.provider.list_voices(filter).await?;

        tracing::debug!(
            provider = self.provider.name(),
            language = filter.unwrap_or("*"),
            count = voices.len(),
            "Voice catalog fetched"
        );

        Ok(voices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ProviderError;
    use crate::domain::voice::SsmlGender;
    use crate::infrastructure::adapters::FakeTtsClient;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("en-US-Standard-A", vec!["en-US".into()], SsmlGender::Female, 24000),
            Voice::new("he-IL-Standard-A", vec!["he-IL".into()], SsmlGender::Female, 24000),
            Voice::new("he-IL-Wavenet-B", vec!["he-IL".into()], SsmlGender::Male, 24000),
        ]
    }

    #[tokio::test]
    async fn test_filters_by_language() {
        let provider = Arc::new(FakeTtsClient::new().with_voices(catalog()));
        let handler = ListVoicesHandler::new(provider);

        let voices = handler.handle(ListVoices::for_language("he-IL")).await.unwrap();

        assert_eq!(voices.len(), 2);
        assert!(voices.iter().all(|v| v.supports("he-IL")));
    }

    #[tokio::test]
    async fn test_blank_filter_returns_full_catalog() {
        let provider = Arc::new(FakeTtsClient::new().with_voices(catalog()));
        let handler = ListVoicesHandler::new(provider);

        let voices = handler.handle(ListVoices::for_language("  ")).await.unwrap();
        assert_eq!(voices.len(), 3);

        let voices = handler.handle(ListVoices::default()).await.unwrap();
        assert_eq!(voices[0].name(), "en-US-Standard-A");
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let provider = Arc::new(
            FakeTtsClient::new().failing_with(|| ProviderError::Network("connection reset".into())),
        );
        let handler = ListVoicesHandler::new(provider);

        let result = handler.handle(ListVoices::for_language("en-US")).await;
        assert!(matches!(result, Err(ApplicationError::Provider(_))));
    }
}
