//! CLI command definitions and dispatch for the `buddy` binary.
//!
//! Uses clap derive macros for argument parsing. Each verb is a subcommand
//! (e.g., `buddy bash "find large files"`, `buddy model llama3.2`).

pub mod ask;
pub mod context;
pub mod settings;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Ask a local LLM for bash commands or general answers from the terminal.
#[derive(Parser)]
#[command(name = "buddy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text (settings verbs).
    #[arg(long, global = true)]
    pub json: bool,

    /// Diagnostic logging on stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit diagnostic logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Model for this invocation, instead of the saved one.
    #[arg(long, global = true, env = "BUDDY_MODEL")]
    pub model: Option<String>,

    /// Backend URL for this invocation, instead of the saved one.
    #[arg(long, global = true, env = "BUDDY_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API key for backends that require one (Ollama does not).
    #[arg(long, global = true, env = "BUDDY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the AI for a bash command.
    Bash(AskArgs),

    /// Ask the AI a general question.
    General(AskArgs),

    /// Set the model to use for completion.
    Model {
        /// Model name.
        name: String,
    },

    /// Set the backend URL (e.g. http://localhost:11434).
    Endpoint {
        /// Backend root URL.
        url: String,
    },

    /// Show the effective settings and where they are stored.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Arguments shared by the question verbs.
#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Show the raw response, including the model's reasoning, and echo the
    /// question and piped context.
    #[arg(short, long)]
    pub verbose: bool,

    /// Prompt for the AI.
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl AskArgs {
    /// The prompt words joined back into one question.
    pub fn question(&self) -> String {
        self.prompt.join(" ")
    }
}

impl Commands {
    /// Whether the verb asked for verbose output.
    pub fn is_verbose(&self) -> bool {
        match self {
            Commands::Bash(args) | Commands::General(args) => args.verbose,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bash_verb_with_verbose() {
        let cli = Cli::try_parse_from(["buddy", "bash", "-v", "list", "open", "ports"]).unwrap();
        match cli.command {
            Commands::Bash(args) => {
                assert!(args.verbose);
                assert_eq!(args.question(), "list open ports");
            }
            _ => panic!("expected bash verb"),
        }
    }

    #[test]
    fn parses_general_verb() {
        let cli = Cli::try_parse_from(["buddy", "general", "why is the sky blue?"]).unwrap();
        assert!(!cli.command.is_verbose());
        assert!(matches!(cli.command, Commands::General(_)));
    }

    #[test]
    fn question_verbs_require_a_prompt() {
        assert!(Cli::try_parse_from(["buddy", "bash"]).is_err());
    }

    #[test]
    fn parses_model_verb() {
        let cli = Cli::try_parse_from(["buddy", "model", "llama3.2"]).unwrap();
        match cli.command {
            Commands::Model { name } => assert_eq!(name, "llama3.2"),
            _ => panic!("expected model verb"),
        }
    }

    #[test]
    fn global_overrides_after_verb() {
        let cli = Cli::try_parse_from([
            "buddy",
            "general",
            "hi",
            "--model",
            "qwen2.5",
            "--endpoint",
            "http://gpu-box:11434",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("qwen2.5"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://gpu-box:11434"));
    }
}
