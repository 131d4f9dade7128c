use clap::{Args, Parser, Subcommand};

/// `PersonaChat` - interview a simulated user persona and export research insights.
#[derive(Parser, Debug)]
#[command(name = "personachat")]
#[command(version)]
#[command(about = "Interview a simulated user persona.", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Persona description; missing fields are asked for interactively.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaArgs {
    /// Persona name (e.g. "Maya")
    #[arg(long)]
    pub name: Option<String>,

    /// Persona role (e.g. "Analyst")
    #[arg(long)]
    pub role: Option<String>,

    /// Behavioral traits (e.g. "impatient, detail-oriented")
    #[arg(long)]
    pub traits: Option<String>,

    /// What the interview is about; other topics are refused
    #[arg(long)]
    pub scope: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive interview with a persona
    Chat {
        #[command(flatten)]
        persona: PersonaArgs,

        /// Directory for exported reports (overrides config)
        #[arg(long)]
        report_dir: Option<std::path::PathBuf>,
    },

    /// Print the system instruction that would be sent for a message
    Prompt {
        #[command(flatten)]
        persona: PersonaArgs,

        /// Researcher message used for the tone hint
        #[arg(short, long, default_value = "")]
        message: String,
    },

    /// Show configuration and credential status
    Status,
}
