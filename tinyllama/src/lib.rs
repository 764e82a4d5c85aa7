use async_trait::async_trait;
use common::config::AssistantConfig;
use common::protocol::{
    CodeAnalysis, CompletionOptions, CompletionRequest, GenerationSettings, ModelState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub mod analysis;
pub mod notify;
pub mod readiness;
pub mod snippets;

use notify::Notifier;
use readiness::ReadyGate;

pub const INIT_NOTICE_TITLE: &str = "Initializing TinyLlama";
pub const INIT_NOTICE_MESSAGE: &str = "Please wait while the model is being loaded...";

/// The call surface UI code binds against.
#[async_trait]
pub trait CodeAssistant: Send + Sync {
    async fn analyze_code(&self, code: &str, language: &str) -> CodeAnalysis;
    async fn complete_code(
        &self,
        prompt: &str,
        language: &str,
        options: Option<CompletionOptions>,
    ) -> String;
    async fn explain_code(&self, code: &str, language: &str) -> String;
}

#[derive(Debug, Clone, Copy)]
struct Timings {
    analyze: Duration,
    complete: Duration,
    explain: Duration,
    notice: Duration,
}

/// Simulated TinyLlama model. Outputs come from keyword rules after a fixed
/// delay; every call waits for the one-time initialization first.
pub struct TinyLlama {
    gate: ReadyGate,
    notifier: Arc<dyn Notifier>,
    timings: Timings,
    defaults: GenerationSettings,
}

impl TinyLlama {
    /// Starts initialization immediately. Must be called inside a tokio runtime.
    pub fn new(config: &AssistantConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_gate(ReadyGate::after(config.init_delay()), config, notifier)
    }

    pub fn with_gate(gate: ReadyGate, config: &AssistantConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gate,
            notifier,
            timings: Timings {
                analyze: config.analyze_delay(),
                complete: config.complete_delay(),
                explain: config.explain_delay(),
                notice: config.notice_duration(),
            },
            defaults: config.generation_defaults(),
        }
    }

    pub fn state(&self) -> ModelState {
        self.gate.state()
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Waits for initialization without raising a notice.
    pub async fn ready(&self) {
        self.gate.wait().await;
    }

    pub fn defaults(&self) -> GenerationSettings {
        self.defaults
    }

    pub async fn complete(&self, request: &CompletionRequest) -> String {
        self.complete_code(&request.prompt, &request.language, request.options)
            .await
    }

    async fn wait_for_initialization(&self) {
        if self.gate.is_ready() {
            return;
        }
        info!("Waiting for TinyLlama to initialize...");
        self.notifier
            .notify(INIT_NOTICE_TITLE, INIT_NOTICE_MESSAGE, self.timings.notice);
        self.gate.wait().await;
    }
}

#[async_trait]
impl CodeAssistant for TinyLlama {
    async fn analyze_code(&self, code: &str, language: &str) -> CodeAnalysis {
        self.wait_for_initialization().await;
        info!("Analyzing {} code with TinyLlama", language);

        tokio::time::sleep(self.timings.analyze).await;

        let result = analysis::analyze(code);
        debug!(
            "Estimated time {} / space {}",
            result.time_complexity, result.space_complexity
        );
        result
    }

    async fn complete_code(
        &self,
        prompt: &str,
        language: &str,
        options: Option<CompletionOptions>,
    ) -> String {
        self.wait_for_initialization().await;

        let settings = options.unwrap_or_default().merged_over(self.defaults);
        info!(
            "Completing {} code with TinyLlama (temp: {})",
            language, settings.temperature
        );
        debug!("max tokens {}, model {}", settings.max_tokens, settings.model);

        tokio::time::sleep(self.timings.complete).await;

        let topic = snippets::Topic::detect(prompt);
        debug!("Selected {:?} completion", topic);
        snippets::completion_for(prompt).to_string()
    }

    async fn explain_code(&self, code: &str, language: &str) -> String {
        self.wait_for_initialization().await;
        info!("Explaining {} code with TinyLlama", language);

        tokio::time::sleep(self.timings.explain).await;

        snippets::explanation_for(code).to_string()
    }
}
