use crate::app::interview::Interview;
use crate::app::status::render_status;
use crate::cli::{Cli, Commands, PersonaArgs};
use crate::config::Config;
use crate::llm::{CredentialSource, EnvCredentialSource, GeminiTransport, GenerationClient};
use crate::prompt::SystemInstructionBuilder;
use crate::report::ReportGenerator;
use crate::session::{Persona, PersonaFields, SessionStore};
use anyhow::Result;
use dialoguer::Input;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Fill in persona fields missing from the command line, prompting when
/// stdin is a terminal and leaving them empty otherwise.
fn resolve_persona(args: PersonaArgs) -> Result<PersonaFields> {
    let interactive = std::io::stdin().is_terminal();
    let ask = |value: Option<String>, prompt: &str| -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None if interactive => Ok(Input::<String>::new()
                .with_prompt(format!("  {prompt}"))
                .allow_empty(true)
                .interact_text()?),
            None => Ok(String::new()),
        }
    };

    Ok(PersonaFields {
        name: ask(args.name, "Persona name")?,
        role: ask(args.role, "Role")?,
        traits: ask(args.traits, "Behavioral traits")?,
        scope: ask(args.scope, "Simulation scope")?,
    })
}

fn build_client(config: &Config) -> Result<GenerationClient> {
    let transport = GeminiTransport::new(config.api_base_url.clone());
    let credentials = Arc::new(EnvCredentialSource::new(config.api_key.clone()));
    GenerationClient::from_config(config, Box::new(transport), credentials)
}

async fn run_chat(config: Config, persona: PersonaArgs, report_dir: Option<PathBuf>) -> Result<()> {
    let fields = resolve_persona(persona)?;
    let report_dir = report_dir.unwrap_or_else(|| config.report.output_dir.clone());

    let store = Arc::new(SessionStore::new(build_client(&config)?));
    let interview = Interview::start(store, ReportGenerator::new()?, report_dir, fields);
    info!(
        session_id = interview.session_id(),
        model = %config.model,
        "Interview started"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    interview.run(stdin).await
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Chat {
            persona,
            report_dir,
        } => run_chat(config, persona, report_dir).await,

        Commands::Prompt { persona, message } => {
            let persona = Persona::from_fields(resolve_persona(persona)?);
            let instruction = SystemInstructionBuilder::new()?.build(&persona, &message)?;
            println!("{instruction}");
            Ok(())
        }

        Commands::Status => {
            let credential = EnvCredentialSource::new(config.api_key.clone()).resolve();
            println!("{}", render_status(&config, &credential));
            Ok(())
        }
    }
}
