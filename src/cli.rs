// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::{check_session, fixture_by_stage, fixture_candidates};
use crate::core::{ClientConfig, FsOps, ServiceClient, UploadFile};
use crate::environment::EnvironmentConfig;
use crate::error::{ApiError, ApiResult};
use crate::export;
use crate::task_poller::{CancelToken, PollPolicy};
use crate::types::{
    FavoriteSource, PipelineStage, RankedCandidate, RoleStatus, StopTaskResponse, TaskKind,
};

#[derive(Parser, Debug)]
#[command(name = "recruiter")]
#[command(about = "Command-line client for the recruiter platform API")]
pub struct Cli {
    /// YAML file with `local` / `production` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend root; overrides RECRUITER_API_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session cookie as `name=value`; overrides RECRUITER_SESSION_COOKIE
    #[arg(long, global = true)]
    pub session_cookie: Option<String>,

    /// Seconds allowed per JSON request, 0 for no limit. Uploads are not limited.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the user the session cookie belongs to
    Whoami,
    /// Manage roles (job descriptions)
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
    /// Run candidate searches and resume rankings
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
    /// Upload job descriptions and resumes
    Upload {
        #[command(subcommand)]
        command: UploadCommand,
    },
    /// Mark ranked candidates as favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Show a role's hiring pipeline
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RolesCommand {
    /// List roles of the current user
    List {
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
    /// Create a role from a job description file
    Create { file: PathBuf },
    /// Open or close a role
    Status { role_id: String, status: RoleStatus },
    /// Replace the job description text
    Edit {
        role_id: String,
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        /// Read the new text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete a role
    Delete { role_id: String },
}

#[derive(Subcommand, Debug)]
pub enum SearchCommand {
    /// Start the search-and-rank pipeline
    Start {
        jd_id: String,
        #[arg(default_value = "")]
        prompt: String,
        /// Poll until the task finishes
        #[arg(long)]
        wait: bool,
    },
    /// Start an Apollo search (1 = fast, 2 = web + Apollo)
    Apollo {
        jd_id: String,
        #[arg(long, default_value_t = 1)]
        option: u8,
        #[arg(default_value = "")]
        prompt: String,
        #[arg(long)]
        wait: bool,
    },
    /// Rank uploaded resumes against a job description
    Rank {
        jd_id: String,
        #[arg(default_value = "")]
        prompt: String,
        #[arg(long)]
        wait: bool,
    },
    /// Poll a task once
    Results {
        task_id: String,
        /// The task is a resume ranking
        #[arg(long)]
        resumes: bool,
    },
    /// Poll a task until it finishes; Ctrl-C stops it
    Wait {
        task_id: String,
        #[arg(long)]
        resumes: bool,
        #[arg(long)]
        interval_ms: Option<u64>,
        #[arg(long)]
        max_attempts: Option<u32>,
    },
    /// Ask the backend to stop a task
    Cancel { task_id: String },
    /// Generate a LinkedIn URL for a candidate profile
    Linkedin { profile_id: String },
}

#[derive(Subcommand, Debug)]
pub enum UploadCommand {
    /// Upload and parse a job description
    Jd { file: PathBuf },
    /// Upload resumes for a job description
    Resumes {
        jd_id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// Set or clear the favorite flag
    Toggle {
        candidate_id: String,
        /// ranked_candidates (search) or ranked_candidates_from_resume (resume)
        #[arg(long, default_value = "ranked_candidates")]
        source: FavoriteSource,
        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
    },
    /// List favorites of a job description
    List { jd_id: String },
}

#[derive(Subcommand, Debug)]
pub enum PipelineCommand {
    /// Built-in pipeline board
    Fixture {
        #[arg(long, value_enum)]
        stage: Option<StageArg>,
    },
    /// Pipeline served by the backend for a role
    Fetch { role_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    InConsideration,
    Interviewing,
    OfferExtended,
    Rejected,
    Hired,
}

impl From<StageArg> for PipelineStage {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::InConsideration => PipelineStage::InConsideration,
            StageArg::Interviewing => PipelineStage::Interviewing,
            StageArg::OfferExtended => PipelineStage::OfferExtended,
            StageArg::Rejected => PipelineStage::Rejected,
            StageArg::Hired => PipelineStage::Hired,
        }
    }
}

impl Cli {
    /// Config file, then environment, then command-line flags.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = EnvironmentConfig::load(self.config.as_deref())?.client;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(cookie) = &self.session_cookie {
            config.session_cookie = Some(cookie.clone());
        }
        if let Some(seconds) = self.timeout {
            config.timeout_seconds = seconds;
        }
        Ok(config)
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = cli.client_config()?;
    let client = ServiceClient::new(&config).context("Failed to create backend client")?;
    let format = cli.format;

    match cli.command {
        Command::Whoami => {
            let session = check_session(&client).await;
            match &session.user {
                Some(user) => print_json(user)?,
                None => println!("Not logged in"),
            }
        }

        Command::Roles { command } => handle_roles(&client, command, format).await?,

        Command::Search { command } => {
            handle_search(&client, command, config.poll_policy(), format).await?
        }

        Command::Upload { command } => match command {
            UploadCommand::Jd { file } => {
                let file = UploadFile::from_path(&file).await?;
                print_json(&client.upload_jd(file).await?)?;
            }
            UploadCommand::Resumes { jd_id, files } => {
                let files = FsOps::read_uploads(&files).await?;
                let response = client.upload_resumes(&jd_id, files).await?;
                print_json(&response)?;
            }
        },

        Command::Favorites { command } => match command {
            FavoritesCommand::Toggle {
                candidate_id,
                source,
                off,
            } => {
                let response = client.toggle_favorite(&candidate_id, source, !off).await?;
                print_json(&response)?;
            }
            FavoritesCommand::List { jd_id } => {
                print_json(&client.favorites_for_jd(&jd_id).await?)?;
            }
        },

        Command::Pipeline { command } => {
            let candidates = match command {
                PipelineCommand::Fixture { stage: None } => fixture_candidates(),
                PipelineCommand::Fixture { stage: Some(stage) } => fixture_by_stage(stage.into()),
                PipelineCommand::Fetch { role_id } => client.fetch_pipeline(&role_id).await?,
            };
            match format {
                OutputFormat::Json => print_json(&candidates)?,
                OutputFormat::Csv => export::write_pipeline_csv(&candidates, io::stdout())?,
            }
        }
    }

    Ok(())
}

async fn handle_roles(
    client: &ServiceClient,
    command: RolesCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        RolesCommand::List { sort, filter } => {
            let roles = client
                .list_roles(sort.as_deref(), filter.as_deref())
                .await?;
            info!("Fetched {} roles", roles.len());
            match format {
                OutputFormat::Json => print_json(&roles)?,
                OutputFormat::Csv => export::write_roles_csv(&roles, io::stdout())?,
            }
        }
        RolesCommand::Create { file } => {
            let file = UploadFile::from_path(&file).await?;
            print_json(&client.create_role(file).await?)?;
        }
        RolesCommand::Status { role_id, status } => {
            print_json(&client.update_role_status(&role_id, status).await?)?;
        }
        RolesCommand::Edit {
            role_id,
            text,
            file,
        } => {
            let content = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read file: {}", path.display()))?,
                (None, None) => anyhow::bail!("Pass --text or --file"),
            };
            print_json(&client.edit_role_content(&role_id, &content).await?)?;
        }
        RolesCommand::Delete { role_id } => {
            client.delete_role(&role_id).await?;
            println!("Deleted role {}", role_id);
        }
    }
    Ok(())
}

async fn handle_search(
    client: &ServiceClient,
    command: SearchCommand,
    policy: PollPolicy,
    format: OutputFormat,
) -> Result<()> {
    match command {
        SearchCommand::Start {
            jd_id,
            prompt,
            wait,
        } => {
            let task = client.start_search(&jd_id, &prompt).await?;
            finish_start(client, TaskKind::Search, &task.task_id, wait, policy, format).await?;
        }
        SearchCommand::Apollo {
            jd_id,
            option,
            prompt,
            wait,
        } => {
            let task = client.start_apollo_search(&jd_id, &prompt, option).await?;
            finish_start(client, TaskKind::Search, &task.task_id, wait, policy, format).await?;
        }
        SearchCommand::Rank {
            jd_id,
            prompt,
            wait,
        } => {
            let task = client.start_resume_ranking(&jd_id, &prompt).await?;
            finish_start(
                client,
                TaskKind::ResumeRanking,
                &task.task_id,
                wait,
                policy,
                format,
            )
            .await?;
        }
        SearchCommand::Results { task_id, resumes } => {
            let status = client.poll_task(task_kind(resumes), &task_id).await?;
            print_json(&status)?;
        }
        SearchCommand::Wait {
            task_id,
            resumes,
            interval_ms,
            max_attempts,
        } => {
            let policy = PollPolicy::new(
                interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(policy.interval()),
                max_attempts.unwrap_or(policy.max_attempts()),
            );
            wait_for_task(client, task_kind(resumes), &task_id, policy, format).await?;
        }
        SearchCommand::Cancel { task_id } => {
            print_json(&client.stop_task(&task_id).await?)?;
        }
        SearchCommand::Linkedin { profile_id } => {
            print_json(&client.generate_linkedin_url(&profile_id).await?)?;
        }
    }
    Ok(())
}

fn task_kind(resumes: bool) -> TaskKind {
    if resumes {
        TaskKind::ResumeRanking
    } else {
        TaskKind::Search
    }
}

async fn finish_start(
    client: &ServiceClient,
    kind: TaskKind,
    task_id: &str,
    wait: bool,
    policy: PollPolicy,
    format: OutputFormat,
) -> Result<()> {
    if wait {
        wait_for_task(client, kind, task_id, policy, format).await
    } else {
        println!("{}", task_id);
        Ok(())
    }
}

/// Poll until done. Ctrl-C abandons polling and asks the backend to stop the
/// task; a second Ctrl-C stops waiting for that request too.
async fn wait_for_task(
    client: &ServiceClient,
    kind: TaskKind,
    task_id: &str,
    policy: PollPolicy,
    format: OutputFormat,
) -> Result<()> {
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = client.wait_for_task(kind, task_id, policy, &cancel).await;
    interrupt.abort();

    match result {
        Ok(candidates) => print_candidates(&candidates, format),
        Err(ApiError::PollCancelled) => {
            warn!("Interrupted, stopping task {}", task_id);
            let interrupted = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            };
            match stop_unless_interrupted(client.stop_task(task_id), interrupted).await? {
                Some(response) => println!("{}", response.message),
                None => warn!("Interrupted again, task {} may still be running", task_id),
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// `None` when `interrupt` resolves before the stop request does.
async fn stop_unless_interrupted<S, I>(stop: S, interrupt: I) -> Result<Option<StopTaskResponse>>
where
    S: Future<Output = ApiResult<StopTaskResponse>>,
    I: Future<Output = ()>,
{
    tokio::select! {
        response = stop => Ok(Some(response?)),
        _ = interrupt => Ok(None),
    }
}

fn print_candidates(candidates: &[RankedCandidate], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&candidates),
        OutputFormat::Csv => export::write_candidates_csv(candidates, io::stdout()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
