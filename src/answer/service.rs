//! Answer generation service.

use super::context::augment_question;
use super::Turn;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, GeminiEmbedder};
use crate::error::{ProfChatError, Result};
use crate::genai::{Content, GeminiClient, GeminiGenerator, Generator};
use crate::index::{PineconeIndex, VectorIndex};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Stateless answer service.
///
/// Each call embeds the newest user message, retrieves the closest reviews,
/// and asks the chat model to answer with that context. The provider
/// capabilities are injected so nothing here touches global state.
pub struct AnswerService {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    top_k: usize,
    max_output_tokens: u32,
}

impl AnswerService {
    /// Create a service from explicit capabilities, with default limits.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
            prompts: Prompts::default(),
            top_k: 5,
            max_output_tokens: 1000,
        }
    }

    /// Build the service from settings, wiring the real providers.
    ///
    /// Fails with a configuration error if credentials or the index host
    /// are missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.index.host.is_empty() {
            return Err(ProfChatError::Config(
                "Vector index host not configured. Set index.host in the config file.".to_string(),
            ));
        }

        let timeout = Duration::from_secs(settings.generation.request_timeout_seconds);
        let gemini = Arc::new(GeminiClient::from_env_with_timeout(timeout)?);

        let embedder = Arc::new(GeminiEmbedder::with_config(
            gemini.clone(),
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let index = Arc::new(PineconeIndex::from_env(
            &settings.index.host,
            &settings.index.namespace,
            timeout,
        )?);

        let generator = Arc::new(GeminiGenerator::new(gemini, &settings.generation.model));

        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        Ok(Self {
            embedder,
            index,
            generator,
            prompts,
            top_k: settings.index.top_k,
            max_output_tokens: settings.generation.max_output_tokens,
        })
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the number of reviews retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer the conversation's newest user turn.
    ///
    /// The full history is replayed to the chat model with the system
    /// instruction first and the augmented question as the final turn.
    #[instrument(skip(self, turns), fields(turns = turns.len()))]
    pub async fn answer(&self, turns: &[Turn]) -> Result<String> {
        let question = turns
            .last()
            .map(|t| t.content.as_str())
            .ok_or_else(|| ProfChatError::InvalidInput("Conversation is empty".to_string()))?;

        info!("Answering question: {}", question);

        // Embedding failures (including invalid shapes) stop the pipeline
        // before any index or chat call is made.
        let embedding = self.embedder.embed(question).await?;

        let matches = self.index.query(&embedding, self.top_k).await?;
        debug!("Retrieved {} review matches", matches.len());

        let augmented = augment_question(question, &matches);
        let contents = self.build_contents(turns, augmented);

        let answer = self
            .generator
            .generate(&contents, self.max_output_tokens)
            .await?;

        debug!("Generated answer ({} chars)", answer.len());
        Ok(answer)
    }

    /// Build the chat contents: system instruction first, prior history
    /// mapped role-for-role, and the augmented question replacing the raw
    /// final user turn.
    fn build_contents(&self, turns: &[Turn], augmented: String) -> Vec<Content> {
        let mut contents = Vec::with_capacity(turns.len() + 1);
        contents.push(Content::user(self.prompts.answer.system.clone()));

        for turn in &turns[..turns.len() - 1] {
            contents.push(Content::new(turn.role.provider_role(), turn.content.clone()));
        }

        contents.push(Content::user(augmented));
        contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Role;
    use crate::index::ReviewMatch;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockEmbedder {
        result: std::result::Result<Vec<f32>, String>,
        calls: AtomicUsize,
    }

    impl MockEmbedder {
        fn ok(embedding: Vec<f32>) -> Self {
            Self {
                result: Ok(embedding),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(ProfChatError::Embedding)
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    struct MockIndex {
        matches: Vec<ReviewMatch>,
        calls: AtomicUsize,
    }

    impl MockIndex {
        fn with_matches(matches: Vec<ReviewMatch>) -> Self {
            Self {
                matches,
                calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::with_matches(Vec::new())
        }
    }

    #[async_trait]
    impl VectorIndex for MockIndex {
        async fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<Vec<ReviewMatch>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.matches.clone())
        }
    }

    struct MockGenerator {
        answer: String,
        calls: AtomicUsize,
        seen_contents: Mutex<Option<Vec<Content>>>,
    }

    impl MockGenerator {
        fn answering(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                calls: AtomicUsize::new(0),
                seen_contents: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn generate(&self, contents: &[Content], _max_output_tokens: u32) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_contents.lock().unwrap() = Some(contents.to_vec());
            Ok(self.answer.clone())
        }
    }

    fn sample_match() -> ReviewMatch {
        ReviewMatch {
            id: "Dr. Ada Lovelace".to_string(),
            review: "Brilliant lectures.".to_string(),
            subject: "Computer Science".to_string(),
            stars: 5.0,
        }
    }

    fn service(
        embedder: Arc<MockEmbedder>,
        index: Arc<MockIndex>,
        generator: Arc<MockGenerator>,
    ) -> AnswerService {
        AnswerService::new(embedder, index, generator)
    }

    #[tokio::test]
    async fn test_empty_conversation_is_invalid_input() {
        let embedder = Arc::new(MockEmbedder::ok(vec![1.0, 0.0, 0.0]));
        let index = Arc::new(MockIndex::empty());
        let generator = Arc::new(MockGenerator::answering("hi"));
        let svc = service(embedder.clone(), index, generator);

        let err = svc.answer(&[]).await.unwrap_err();
        assert!(matches!(err, ProfChatError::InvalidInput(_)));
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_stops_pipeline() {
        let embedder = Arc::new(MockEmbedder::failing("Invalid embedding format"));
        let index = Arc::new(MockIndex::empty());
        let generator = Arc::new(MockGenerator::answering("hi"));
        let svc = service(embedder, index.clone(), generator.clone());

        let turns = vec![Turn::new(Role::User, "Who teaches algorithms well?")];
        let err = svc.answer(&turns).await.unwrap_err();

        assert!(matches!(err, ProfChatError::Embedding(_)));
        // No wasted downstream calls.
        assert_eq!(index.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_system_instruction_is_always_first() {
        let embedder = Arc::new(MockEmbedder::ok(vec![1.0, 0.0, 0.0]));
        let index = Arc::new(MockIndex::with_matches(vec![sample_match()]));
        let generator = Arc::new(MockGenerator::answering("Try Dr. Lovelace."));
        let svc = service(embedder, index, generator.clone());

        let turns = vec![
            Turn::new(Role::Assistant, "Hi!"),
            Turn::new(Role::User, "Who teaches algorithms well?"),
        ];
        svc.answer(&turns).await.unwrap();

        let contents = generator.seen_contents.lock().unwrap().clone().unwrap();
        assert_eq!(contents[0].role, "user");
        assert!(contents[0].text().contains("rate my professor"));

        let system_turns = contents
            .iter()
            .filter(|c| c.text().contains("rate my professor"))
            .count();
        assert_eq!(system_turns, 1);
    }

    #[tokio::test]
    async fn test_history_roles_are_mapped_and_question_augmented() {
        let embedder = Arc::new(MockEmbedder::ok(vec![1.0, 0.0, 0.0]));
        let index = Arc::new(MockIndex::with_matches(vec![sample_match()]));
        let generator = Arc::new(MockGenerator::answering("Try Dr. Lovelace."));
        let svc = service(embedder, index, generator.clone());

        let turns = vec![
            Turn::new(Role::Assistant, "Hi!"),
            Turn::new(Role::User, "Earlier question"),
            Turn::new(Role::Other("tool".to_string()), "tool output"),
            Turn::new(Role::User, "Who teaches algorithms well?"),
        ];
        let answer = svc.answer(&turns).await.unwrap();
        assert_eq!(answer, "Try Dr. Lovelace.");

        let contents = generator.seen_contents.lock().unwrap().clone().unwrap();
        // system + 3 history turns + augmented question
        assert_eq!(contents.len(), 5);
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].text(), "Hi!");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[3].role, "tool");

        let last = contents.last().unwrap();
        assert_eq!(last.role, "user");
        assert!(last.text().starts_with("Who teaches algorithms well?"));
        assert!(last.text().contains("Professor: Dr. Ada Lovelace"));
        // The raw final turn is replaced, not duplicated.
        assert_eq!(
            contents
                .iter()
                .filter(|c| c.text() == "Who teaches algorithms well?")
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn test_zero_matches_still_generates() {
        let embedder = Arc::new(MockEmbedder::ok(vec![1.0, 0.0, 0.0]));
        let index = Arc::new(MockIndex::empty());
        let generator = Arc::new(MockGenerator::answering("No strong matches."));
        let svc = service(embedder, index.clone(), generator.clone());

        let turns = vec![Turn::new(Role::User, "Who teaches basket weaving?")];
        let answer = svc.answer(&turns).await.unwrap();
        assert_eq!(answer, "No strong matches.");

        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
        let contents = generator.seen_contents.lock().unwrap().clone().unwrap();
        assert_eq!(
            contents.last().unwrap().text(),
            "Who teaches basket weaving?"
        );
    }
}
