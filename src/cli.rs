// src/cli.rs
use crate::environment::{EnvironmentConfig, DEFAULT_CONFIG_PATH};
use crate::linkedin::pdf_text::read_pdf_file;
use crate::linkedin::LinkedInImport;
use crate::types::ResumeFormat;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "linkedin-import")]
#[command(about = "Turn LinkedIn profile exports into structured resume data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a LinkedIn "Save to PDF" export
    Parse {
        pdf: PathBuf,
        #[arg(long, default_value_t = ResumeFormat::Json)]
        format: ResumeFormat,
        /// Print the mapped resume record instead of the raw profile
        #[arg(long)]
        resume: bool,
    },
    /// Parse profile text that was already extracted from an export
    ParseText {
        text_file: PathBuf,
        #[arg(long, default_value_t = ResumeFormat::Json)]
        format: ResumeFormat,
        #[arg(long)]
        resume: bool,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            pdf,
            format,
            resume,
        } => {
            let bytes = read_pdf_file(&pdf).await?;
            let import = LinkedInImport::from_pdf(&bytes)
                .with_context(|| format!("Failed to import {}", pdf.display()))?;
            info!("Imported {}", pdf.display());
            println!("{}", render_import(&import, format, resume)?);
        }

        Command::ParseText {
            text_file,
            format,
            resume,
        } => {
            let text = tokio::fs::read_to_string(&text_file)
                .await
                .with_context(|| format!("Failed to read {}", text_file.display()))?;
            let import = LinkedInImport::from_text(&text);
            info!("Imported {}", text_file.display());
            println!("{}", render_import(&import, format, resume)?);
        }

        Command::Serve { config, port } => {
            let mut environment = EnvironmentConfig::load(&config)?;
            if let Some(port) = port {
                environment.port = port;
            }
            start_web_server(environment).await?;
        }
    }

    Ok(())
}

pub fn render_import(import: &LinkedInImport, format: ResumeFormat, resume: bool) -> Result<String> {
    if resume {
        format.render(&import.resume)
    } else {
        format.render(&import.profile)
    }
}
