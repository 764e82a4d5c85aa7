use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::config::StudyBuddyConfig;
use common::protocol::{CompletionOptions, ModelSize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tinyllama::notify::ChannelNotifier;
use tinyllama::{CodeAssistant, TinyLlama};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "StudyBuddy code assistant", long_about = None)]
struct Args {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate time and space complexity
    Analyze(Input),
    /// Generate code from a prompt
    Complete {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        model: Option<ModelSize>,
    },
    /// Explain a piece of code
    Explain(Input),
}

#[derive(clap::Args, Debug)]
struct Input {
    #[arg(long, default_value = "javascript")]
    language: String,
    /// Read the text from a file ("-" for stdin)
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
    text: Vec<String>,
}

impl Input {
    fn read(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() == "-" => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path)),
            None => Ok(self.text.join(" ")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = StudyBuddyConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {:?}", args.config))?;

    let (notifier, mut notices) = ChannelNotifier::new();
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            eprintln!("[{}] {}", notice.title, notice.message);
        }
    });

    let assistant: Arc<dyn CodeAssistant> =
        Arc::new(TinyLlama::new(&config.assistant(), Arc::new(notifier)));

    let output = run(assistant.as_ref(), &args.command).await?;
    println!("{}", output);
    Ok(())
}

async fn run(assistant: &dyn CodeAssistant, command: &Command) -> Result<String> {
    match command {
        Command::Analyze(input) => {
            let code = input.read()?;
            let analysis = assistant.analyze_code(&code, &input.language).await;
            info!("Analysis complete: {}", analysis.time_complexity);
            Ok(serde_json::to_string_pretty(&analysis)?)
        }
        Command::Complete {
            input,
            temperature,
            max_tokens,
            model,
        } => {
            let prompt = input.read()?;
            let options = CompletionOptions {
                temperature: *temperature,
                max_tokens: *max_tokens,
                model: *model,
            };
            Ok(assistant
                .complete_code(&prompt, &input.language, Some(options))
                .await)
        }
        Command::Explain(input) => {
            let code = input.read()?;
            Ok(assistant.explain_code(&code, &input.language).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::AssistantConfig;
    use std::ffi::OsString;
    use std::io::Write;
    use tinyllama::notify::LogNotifier;
    use tinyllama::readiness::ReadyGate;

    fn instant_assistant() -> TinyLlama {
        let config: AssistantConfig = serde_json::from_value(serde_json::json!({
            "analyzeDelayMs": 0,
            "completeDelayMs": 0,
            "explainDelayMs": 0
        }))
        .unwrap();
        TinyLlama::with_gate(ReadyGate::ready(), &config, Arc::new(LogNotifier))
    }

    #[test]
    fn test_parse_complete_options() {
        let args = Args::try_parse_from([
            "studybuddy",
            "complete",
            "--model",
            "tiny",
            "--temperature",
            "0.5",
            "sort",
            "numbers",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        match args.command {
            Command::Complete {
                input,
                temperature,
                model,
                max_tokens,
            } => {
                assert_eq!(input.text, vec!["sort", "numbers"]);
                assert_eq!(input.language, "javascript");
                assert_eq!(temperature, Some(0.5));
                assert_eq!(model, Some(ModelSize::Tiny));
                assert_eq!(max_tokens, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_model() {
        let err = Args::try_parse_from(["studybuddy", "complete", "--model", "huge", "x"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_file_and_text_conflict() {
        let err = Args::try_parse_from(["studybuddy", "explain", "--file", "a.js", "inline"]);
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_analyze_from_file_prints_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "for (a of xs) {{ for (b of ys) {{}} }}").unwrap();

        let args = Args::try_parse_from([
            OsString::from("studybuddy"),
            OsString::from("analyze"),
            OsString::from("--file"),
            file.path().as_os_str().to_owned(),
        ])
        .unwrap();

        let output = run(&instant_assistant(), &args.command).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["timeComplexity"], "O(n²)");
        assert_eq!(value["spaceComplexity"], "O(1)");
    }

    #[tokio::test]
    async fn test_missing_input_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.js");
        let args = Args::try_parse_from([
            OsString::from("studybuddy"),
            OsString::from("explain"),
            OsString::from("--file"),
            missing.into_os_string(),
        ])
        .unwrap();

        assert!(run(&instant_assistant(), &args.command).await.is_err());
    }

    #[tokio::test]
    async fn test_explain_inline_text() {
        let args = Args::try_parse_from(["studybuddy", "explain", "binary", "search"]).unwrap();
        let output = run(&instant_assistant(), &args.command).await.unwrap();
        assert_eq!(output, tinyllama::snippets::SEARCH_EXPLANATION);
    }
}
