//! Card generation: AI first, mock bank as the fallback

use cardify_core::{fit_to_count, mock, parse_outcome, prompt, questions_only, CardDraft};

use super::ai::{AiError, GenerativeModel};

/// Produce exactly `count` cards for `topic` (fewer only when the mock
/// bank itself is smaller). Never fails: every AI problem degrades to the
/// mock generator.
pub async fn generate_cards<M: GenerativeModel>(
    model: Option<&M>,
    topic: &str,
    count: usize,
) -> Vec<CardDraft> {
    let Some(model) = model else {
        tracing::warn!(topic, "no AI credential configured, using mock cards");
        return mock::generate(topic, count);
    };

    match generate_with_model(model, topic, count).await {
        Ok(cards) if !cards.is_empty() => cards,
        Ok(_) => {
            tracing::warn!(topic, "no cards could be extracted from the AI response, using mock cards");
            mock::generate(topic, count)
        }
        Err(e) => {
            tracing::error!(topic, error = %e, "AI generation failed, using mock cards");
            mock::generate(topic, count)
        }
    }
}

async fn generate_with_model<M: GenerativeModel>(
    model: &M,
    topic: &str,
    count: usize,
) -> Result<Vec<CardDraft>, AiError> {
    let text = model.generate(&prompt::generation_prompt(topic, count)).await?;

    let outcome = parse_outcome(&text);
    let cards = if outcome.cards.is_empty() {
        let questions = questions_only(&text);
        tracing::warn!(found = questions.len(), "parse cascade found nothing, trying question labels");
        questions
    } else {
        if let Some(strategy) = outcome.strategy {
            tracing::debug!(strategy = strategy.name(), parsed = outcome.cards.len(), "parsed AI response");
        }
        outcome.cards
    };

    if cards.len() != count {
        tracing::info!(parsed = cards.len(), requested = count, "normalizing card count");
    }

    Ok(fit_to_count(cards, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardify_core::CONTINUED_SUFFIX;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns canned text, or fails, and counts calls.
    struct FakeModel {
        reply: Result<String, u16>,
        calls: AtomicUsize,
    }

    impl FakeModel {
        fn replying(text: impl Into<String>) -> Self {
            Self {
                reply: Ok(text.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GenerativeModel for FakeModel {
        async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(AiError::Status {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }
    }

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("{}. Question: What is item {}?\nAnswer: Item {} explained.\n", i, i, i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn no_credential_uses_mock_bank() {
        let cards = generate_cards::<FakeModel>(None, "animals", 5).await;
        assert_eq!(cards.len(), 5);

        let mut fronts: Vec<_> = cards.iter().map(|c| c.front.clone()).collect();
        fronts.sort();
        fronts.dedup();
        assert_eq!(fronts.len(), 5);
    }

    #[tokio::test]
    async fn exact_ai_result_is_kept() {
        let model = FakeModel::replying(numbered(3));
        let cards = generate_cards(Some(&model), "items", 3).await;
        assert_eq!(model.calls(), 1);
        assert_eq!(cards[0], CardDraft::new("What is item 1?", "Item 1 explained."));
        assert_eq!(cards.len(), 3);
    }

    #[tokio::test]
    async fn extra_ai_cards_are_truncated() {
        let model = FakeModel::replying(numbered(8));
        let cards = generate_cards(Some(&model), "items", 5).await;
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4].front, "What is item 5?");
    }

    #[tokio::test]
    async fn missing_ai_cards_are_padded() {
        let model = FakeModel::replying(numbered(2));
        let cards = generate_cards(Some(&model), "items", 5).await;
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[2].front, format!("What is item 1?{}", CONTINUED_SUFFIX));
        assert_eq!(cards[3].front, format!("What is item 2?{}", CONTINUED_SUFFIX));
    }

    #[tokio::test]
    async fn question_labels_are_a_second_attempt() {
        let model = FakeModel::replying("Question: What is a neutron star");
        let cards = generate_cards(Some(&model), "stars", 2).await;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "What is a neutron star");
        assert_eq!(cards[0].back, "");
    }

    #[tokio::test]
    async fn unparsable_text_falls_back_to_mock() {
        let model = FakeModel::replying("ok");
        let cards = generate_cards(Some(&model), "chemistry", 4).await;
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|c| !c.front.is_empty() && !c.back.is_empty()));
    }

    #[tokio::test]
    async fn service_error_falls_back_to_mock() {
        let model = FakeModel::failing(429);
        let cards = generate_cards(Some(&model), "history", 7).await;
        assert_eq!(model.calls(), 1);
        assert_eq!(cards.len(), 7);
        assert_eq!(cards.iter().filter(|c| c.front.starts_with("What is history")).count(), 7);
    }

    #[tokio::test]
    async fn count_contract_holds_for_every_outcome() {
        for count in 1..=20 {
            let outcomes = [
                FakeModel::replying(numbered(20)),
                FakeModel::replying(numbered(1)),
                FakeModel::replying(""),
                FakeModel::failing(500),
            ];
            for model in &outcomes {
                let cards = generate_cards(Some(model), "geography", count).await;
                assert_eq!(cards.len(), count);
            }
            assert_eq!(generate_cards::<FakeModel>(None, "geography", count).await.len(), count);
        }
    }
}
