//! DevFlow CLI - Project and user-story management from the terminal
//!
//! Thin front end over devflow-client. The request identity lives in the
//! config file and is re-read by the client on every call.

mod config;

use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use devflow::domain::services::{
    group_by_level, group_by_type, statistics, FilterOptions, TemplateFilter,
};
use devflow::domain::{
    ClarificationQA, Project, ProjectStatus, PromptLevel, PromptTemplate, PromptType, Provider,
    Role, Session, StoryPriority, StoryStatus, User, UserStory,
};
use devflow_client::ai::{
    RequirementClarificationRequest, RequirementOptimizationRequest, TestCaseGenerationRequest,
    UserStoryOptimizationRequest,
};
use devflow_client::auth::{LoginRequest, RegisterRequest};
use devflow_client::projects::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest};
use devflow_client::prompt_templates::PromptTemplateRequest;
use devflow_client::user_stories::{CreateUserStoryRequest, StoryListQuery};
use devflow_client::users::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use devflow_client::{ApiError, DevFlowClient};
use dialoguer::{Input, Password};
use tracing_subscriber::EnvFilter;

use config::{Config, FileDidStore};

#[derive(Parser)]
#[command(name = "devflow")]
#[command(about = "DevFlow CLI - AI-assisted requirement management", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the request identity
    Login {
        /// Username (will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
        /// Ask the backend to keep the session alive longer
        #[arg(long)]
        remember: bool,
    },

    /// Log out and discard the stored identity
    Logout {
        /// Discard the local identity even if the backend call fails
        #[arg(long)]
        force: bool,
    },

    /// Show the account behind the stored identity
    Whoami,

    /// Register a new account
    Register {
        username: String,
        email: String,
    },

    /// Request a password reset email
    ForgotPassword {
        email: String,
    },

    /// Reset the password with an emailed token
    ResetPassword {
        token: String,
    },

    /// User story operations
    Story {
        #[command(subcommand)]
        action: StoryAction,
    },

    /// Project operations
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// User management operations
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Prompt template operations
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// AI-assisted requirement refinement
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum StoryAction {
    /// Create a user story
    Add {
        title: String,
        /// Requirement text (or use -f for file)
        requirement: Option<String>,
        /// Read the requirement from a file
        #[arg(short, long)]
        file: Option<String>,
        #[arg(short, long)]
        project: Option<String>,
        /// Business context passed to the AI later on
        #[arg(long)]
        context: Option<String>,
        /// HIGH, MEDIUM or LOW
        #[arg(long)]
        priority: Option<StoryPriority>,
        /// Tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// List user stories
    List {
        #[arg(short, long)]
        project: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        status: Option<StoryStatus>,
    },
    /// Show one user story
    Get {
        id: String,
    },
    /// Replace a user story from a JSON payload file
    Update {
        id: String,
        #[arg(short, long)]
        file: String,
    },
    /// Change only the status
    SetStatus {
        id: String,
        status: StoryStatus,
    },
    /// Delete a user story
    Delete {
        id: String,
    },
    /// Batch-import user stories from a JSON file
    Import {
        #[arg(short, long)]
        file: String,
    },
    /// Download the batch-import template
    ImportTemplate {
        /// Where to write the template file
        #[arg(short, long, default_value = "user-story-import-template.xlsx")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Create a project
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List projects
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    /// Show one project
    Get {
        id: String,
    },
    /// Update name, description or status
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    /// Delete a project
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user
    Add {
        username: String,
        email: String,
        /// ADMIN, OPERATOR or USER
        #[arg(long, default_value = "USER")]
        role: Role,
        /// Project memberships (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        projects: Vec<String>,
    },
    /// List users
    List {
        #[arg(long)]
        role: Option<Role>,
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Show one user
    Get {
        id: String,
    },
    /// Update a user; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, value_delimiter = ',')]
        projects: Option<Vec<String>>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
    /// Delete a user
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List templates with optional client-side filters
    List {
        /// Where to load from: mine, system or project
        #[arg(long, default_value = "mine")]
        source: String,
        /// Project id (required when --source project)
        #[arg(short, long)]
        project: Option<String>,
        /// REQUIREMENT_CLARIFICATION or REQUIREMENT_OPTIMIZATION
        #[arg(short = 't', long = "type")]
        template_type: Option<PromptType>,
        /// SYSTEM, PROJECT or USER
        #[arg(short, long)]
        level: Option<PromptLevel>,
        /// Keyword matched against name, description and content
        #[arg(short, long)]
        keyword: Option<String>,
        /// Only enabled (true) or only disabled (false) templates
        #[arg(long)]
        enabled: Option<bool>,
        /// Only templates owned by this project
        #[arg(long)]
        owned_by: Option<String>,
        /// Print aggregate counts instead of the list
        #[arg(long)]
        stats: bool,
    },
    /// Show one template
    Get {
        id: String,
    },
    /// Create a template
    Add {
        name: String,
        #[arg(short = 't', long = "type")]
        template_type: PromptType,
        #[arg(short, long)]
        level: PromptLevel,
        /// Template content (or use -f for file)
        content: Option<String>,
        /// Read content from a file
        #[arg(short, long)]
        file: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        project: Option<String>,
        #[arg(long)]
        disabled: bool,
    },
    /// Update a template; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Read new content from a file
        #[arg(short, long)]
        file: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
    },
    /// Delete a template
    Delete {
        id: String,
    },
    /// Resolve the effective template (USER > PROJECT > SYSTEM)
    Effective {
        #[arg(short = 't', long = "type")]
        template_type: PromptType,
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Show the system default template
    SystemDefault {
        #[arg(short = 't', long = "type")]
        template_type: PromptType,
    },
}

#[derive(Subcommand)]
enum AiAction {
    /// Ask for clarification questions about a requirement
    Clarify {
        /// Requirement text (or use -f for file)
        requirement: Option<String>,
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(short, long)]
        project: Option<String>,
        #[arg(long)]
        template: Option<String>,
        /// dashscope, ollama or openai
        #[arg(long)]
        provider: Option<Provider>,
    },
    /// Optimize a requirement into a user story
    Optimize {
        requirement: Option<String>,
        #[arg(short, long)]
        file: Option<String>,
        /// JSON file with answered clarification questions
        #[arg(short, long)]
        answers: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(short, long)]
        project: Option<String>,
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        provider: Option<Provider>,
    },
    /// Optimize an existing story description
    OptimizeStory {
        title: String,
        description: Option<String>,
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        additional: Option<String>,
        #[arg(long)]
        provider: Option<Provider>,
    },
    /// Generate test cases for a requirement
    TestCases {
        description: Option<String>,
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long)]
        optimized: Option<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        provider: Option<Provider>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { username, remember } => cmd_login(username, remember).await,
        Commands::Logout { force } => cmd_logout(force).await,
        Commands::Whoami => cmd_whoami().await,
        Commands::Register { username, email } => cmd_register(username, email).await,
        Commands::ForgotPassword { email } => cmd_forgot_password(email).await,
        Commands::ResetPassword { token } => cmd_reset_password(token).await,
        Commands::Story { action } => cmd_story(action).await,
        Commands::Project { action } => cmd_project(action).await,
        Commands::User { action } => cmd_user(action).await,
        Commands::Template { action } => cmd_template(action).await,
        Commands::Ai { action } => cmd_ai(action).await,
        Commands::Config => cmd_config(),
    };

    // The session-expired analog of the original "redirect to login".
    if let Err(error) = &result {
        if matches!(
            error.downcast_ref::<ApiError>(),
            Some(ApiError::SessionExpired)
        ) {
            eprintln!(
                "{} Your session has expired. Run {} to continue.",
                "!".yellow(),
                "devflow login".cyan()
            );
        }
    }

    result
}

fn build_client(config: &Config) -> Result<DevFlowClient> {
    DevFlowClient::new(&config.base_url, Arc::new(FileDidStore))
        .context("Failed to build API client")
}

/// Content from an inline argument or a file, exactly one of the two
fn content_from(inline: Option<String>, file: Option<String>, what: &str) -> Result<String> {
    match (inline, file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read file: {}", path))
        }
        (Some(_), Some(_)) => bail!("Cannot specify both {} and --file", what),
        (None, None) => bail!("Provide the {} inline or via --file", what),
    }
}

// ============================================
// Auth commands
// ============================================

async fn cmd_login(username: Option<String>, remember: bool) -> Result<()> {
    let mut config = Config::load()?;
    let client = build_client(&config)?;

    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    print!("Connecting... ");
    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach the DevFlow API at {}", config.base_url);
        }
    }

    let mut session = Session::new();
    let request = LoginRequest {
        username,
        password,
        remember_me: remember,
    };

    let user = match client.login_session(&request, &mut session).await {
        Ok(user) => user,
        Err(ApiError::BadCredentials) => {
            bail!("Login failed. Check your username and password, and try again.")
        }
        Err(error) => return Err(error.into()),
    };

    config.set_identity(user.id.clone(), user.username.clone());
    config.save()?;

    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        user.username.cyan(),
        user.role.to_string().dimmed()
    );
    if !session.project_ids.is_empty() {
        println!("  Projects: {}", session.project_ids.join(", ").dimmed());
    }

    Ok(())
}

async fn cmd_logout(force: bool) -> Result<()> {
    let mut config = Config::load()?;
    if config.did.is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    let client = build_client(&config)?;
    let mut session = Session::new();

    match client.logout_session(&mut session).await {
        Ok(()) => {
            config.clear_identity();
            config.save()?;
            println!("{} Logged out", "✓".green());
            Ok(())
        }
        Err(error) if force => {
            // Backend refused, but the user asked for a local clear anyway.
            config.clear_identity();
            config.save()?;
            println!(
                "{} Logout failed ({}), local identity discarded",
                "!".yellow(),
                error
            );
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}

async fn cmd_whoami() -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    let user = client.me().await?;

    println!("{} {}", user.username.cyan().bold(), user.role);
    println!("  id: {}", user.id.dimmed());
    if let Some(email) = &user.email {
        println!("  email: {}", email);
    }
    if !user.project_ids.is_empty() {
        println!("  projects: {}", user.project_ids.join(", "));
    }

    Ok(())
}

async fn cmd_register(username: String, email: String) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .context("Failed to read password")?;

    let request = RegisterRequest {
        username,
        email,
        password,
    };
    let response = client.register(&request).await?;

    if response.success {
        println!("{} Account created. Run 'devflow login' to sign in.", "✓".green());
    } else {
        bail!(
            "Registration failed: {}",
            response.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    Ok(())
}

async fn cmd_forgot_password(email: String) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    let response = client.forgot_password(&email).await?;
    println!(
        "{} {}",
        if response.success { "✓".green() } else { "✗".red() },
        response
            .message
            .unwrap_or_else(|| "Password reset requested".to_string())
    );

    Ok(())
}

async fn cmd_reset_password(token: String) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    let password = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .context("Failed to read password")?;

    let response = client.reset_password(&token, &password).await?;
    println!(
        "{} {}",
        if response.success { "✓".green() } else { "✗".red() },
        response
            .message
            .unwrap_or_else(|| "Password reset".to_string())
    );

    Ok(())
}

// ============================================
// User story commands
// ============================================

async fn cmd_story(action: StoryAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    match action {
        StoryAction::Add {
            title,
            requirement,
            file,
            project,
            context,
            priority,
            tags,
        } => {
            let original_requirement = content_from(requirement, file, "requirement")?;
            let request = CreateUserStoryRequest {
                title,
                project_id: project,
                tags: if tags.is_empty() { None } else { Some(tags) },
                original_requirement,
                project_context: context,
                priority,
                ..CreateUserStoryRequest::default()
            };

            let story = client.create_user_story(&request).await?;
            println!("{} Story created: {}", "✓".green(), story.id.cyan());
        }

        StoryAction::List {
            project,
            owner,
            status,
        } => {
            let query = StoryListQuery {
                project_id: project,
                owner_id: owner,
                status,
            };
            let page = client.list_user_stories(&query).await?;

            if page.data.is_empty() {
                println!("No user stories found.");
                return Ok(());
            }

            println!("{} ({} total)", "User stories:".bold(), page.total);
            for story in &page.data {
                println!("  {}", story_line(story));
            }
        }

        StoryAction::Get { id } => {
            let story = client.get_user_story(&id).await?;
            print_story(&story);
        }

        StoryAction::Update { id, file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read file: {}", file))?;
            let request: CreateUserStoryRequest = serde_json::from_str(&content)
                .with_context(|| format!("Invalid story payload in {}", file))?;

            let story = client.update_user_story(&id, &request).await?;
            println!("{} Story updated: {}", "✓".green(), story.id.cyan());
        }

        StoryAction::SetStatus { id, status } => {
            let story = client.update_user_story_status(&id, status).await?;
            println!(
                "{} {} is now {}",
                "✓".green(),
                story.id.cyan(),
                story.status.to_string().bold()
            );
        }

        StoryAction::Delete { id } => {
            let response = client.delete_user_story(&id).await?;
            println!(
                "{} {}",
                "✓".green(),
                response.message.unwrap_or_else(|| "Story deleted".to_string())
            );
        }

        StoryAction::Import { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read file: {}", file))?;
            let stories: Vec<CreateUserStoryRequest> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid story list in {}", file))?;

            if stories.is_empty() {
                bail!("{} contains no stories", file);
            }

            let response = client.batch_import_user_stories(&stories).await?;
            println!(
                "{} {}",
                "✓".green(),
                response
                    .message
                    .unwrap_or_else(|| format!("Imported {} stories", stories.len()))
            );
        }

        StoryAction::ImportTemplate { output } => {
            let bytes = client.download_import_template().await?;
            fs::write(&output, bytes)
                .with_context(|| format!("Failed to write template to {}", output))?;
            println!("{} Template saved to {}", "✓".green(), output.cyan());
        }
    }

    Ok(())
}

fn story_line(story: &UserStory) -> String {
    let priority = story
        .priority
        .map(|p| format!(" [{}]", p))
        .unwrap_or_default();
    format!(
        "{} {} ({}){}",
        story.id.dimmed(),
        story.title.cyan(),
        story.status,
        priority.dimmed()
    )
}

fn print_story(story: &UserStory) {
    println!("{} {}", story.title.cyan().bold(), story.status);
    println!("  id: {}", story.id.dimmed());
    if let Some(project_id) = &story.project_id {
        println!("  project: {}", project_id);
    }
    if !story.tags.is_empty() {
        println!("  tags: {}", story.tags.join(", "));
    }
    println!("\n{}", "Requirement:".bold());
    println!("{}", story.original_requirement);
    if !story.clarification_qas.is_empty() {
        println!("\n{}", "Clarifications:".bold());
        for qa in &story.clarification_qas {
            println!("  {} {}", "Q:".bold(), qa.question);
            println!("  {} {}", "A:".bold(), qa.answer);
        }
    }
    if let Some(optimized) = &story.optimized_requirement {
        println!("\n{}", "Optimized requirement:".bold());
        println!("{}", optimized);
    }
    if let Some(narrative) = &story.user_story {
        println!("\n{}", "User story:".bold());
        println!("{}", narrative);
    }
    if let Some(criteria) = &story.acceptance_criteria {
        println!("\n{}", "Acceptance criteria:".bold());
        println!("{}", criteria);
    }
    if let Some(notes) = &story.technical_notes {
        println!("\n{}", "Technical notes:".bold());
        println!("{}", notes);
    }
}

// ============================================
// Project commands
// ============================================

async fn cmd_project(action: ProjectAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    match action {
        ProjectAction::Add { name, description } => {
            let request = CreateProjectRequest {
                name,
                description,
                ..CreateProjectRequest::default()
            };
            let project = client.create_project(&request).await?;
            println!("{} Project created: {}", "✓".green(), project.id.cyan());
        }

        ProjectAction::List { name, status } => {
            let query = ProjectListQuery { name, status };
            let page = client.list_projects(&query).await?;

            if page.data.is_empty() {
                println!("No projects found.");
                return Ok(());
            }

            println!("{} ({} total)", "Projects:".bold(), page.total);
            for project in &page.data {
                println!(
                    "  {} {} ({})",
                    project.id.dimmed(),
                    project.name.cyan(),
                    project.status
                );
            }
        }

        ProjectAction::Get { id } => {
            let project = client.get_project(&id).await?;
            print_project(&project);
        }

        ProjectAction::Update {
            id,
            name,
            description,
            status,
        } => {
            let request = UpdateProjectRequest {
                name,
                description,
                status,
                ..UpdateProjectRequest::default()
            };
            let project = client.update_project(&id, &request).await?;
            println!("{} Project updated: {}", "✓".green(), project.id.cyan());
        }

        ProjectAction::Delete { id } => {
            let response = client.delete_project(&id).await?;
            println!(
                "{} {}",
                "✓".green(),
                response
                    .message
                    .unwrap_or_else(|| "Project deleted".to_string())
            );
        }
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{} ({})", project.name.cyan().bold(), project.status);
    println!("  id: {}", project.id.dimmed());
    if let Some(description) = &project.description {
        println!("  {}", description);
    }
    println!("  owner: {}", project.owner_id);
    if !project.admin_ids.is_empty() {
        println!("  admins: {}", project.admin_ids.join(", "));
    }
    if !project.member_ids.is_empty() {
        println!("  members: {}", project.member_ids.join(", "));
    }
    if let Some(git) = &project.git_repository {
        if let Some(base_url) = &git.base_url {
            println!("  git: {}", base_url);
        }
    }
}

// ============================================
// User commands
// ============================================

async fn cmd_user(action: UserAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    match action {
        UserAction::Add {
            username,
            email,
            role,
            projects,
        } => {
            let password = Password::new()
                .with_prompt("Password for the new user")
                .interact()
                .context("Failed to read password")?;

            let request = CreateUserRequest {
                username,
                email,
                password,
                role,
                project_ids: if projects.is_empty() {
                    None
                } else {
                    Some(projects)
                },
            };
            let user = client.create_user(&request).await?;
            println!("{} User created: {}", "✓".green(), user.id.cyan());
        }

        UserAction::List { role, project } => {
            let query = UserListQuery {
                role,
                project_id: project,
            };
            let page = client.list_users(&query).await?;

            if page.data.is_empty() {
                println!("No users found.");
                return Ok(());
            }

            println!("{} ({} total)", "Users:".bold(), page.total);
            for user in &page.data {
                println!("  {}", user_line(user));
            }
        }

        UserAction::Get { id } => {
            let user = client.get_user(&id).await?;
            println!("{}", user_line(&user));
            if !user.project_ids.is_empty() {
                println!("  projects: {}", user.project_ids.join(", "));
            }
        }

        UserAction::Update {
            id,
            username,
            email,
            role,
            projects,
            password,
        } => {
            let current = client.get_user(&id).await?;

            let new_password = if password {
                Some(
                    Password::new()
                        .with_prompt("New password")
                        .interact()
                        .context("Failed to read password")?,
                )
            } else {
                None
            };

            let request = UpdateUserRequest {
                username: username.unwrap_or(current.username),
                email: email.or(current.email).unwrap_or_default(),
                password: new_password,
                role: role.unwrap_or(current.role),
                project_ids: projects.or(Some(current.project_ids)),
            };
            let user = client.update_user(&id, &request).await?;
            println!("{} User updated: {}", "✓".green(), user.id.cyan());
        }

        UserAction::Delete { id } => {
            let response = client.delete_user(&id).await?;
            println!(
                "{} {}",
                "✓".green(),
                response.message.unwrap_or_else(|| "User deleted".to_string())
            );
        }
    }

    Ok(())
}

fn user_line(user: &User) -> String {
    let email = user
        .email
        .as_deref()
        .map(|e| format!(" <{}>", e))
        .unwrap_or_default();
    format!(
        "{} {}{} ({})",
        user.id.dimmed(),
        user.username.cyan(),
        email.dimmed(),
        user.role
    )
}

// ============================================
// Prompt template commands
// ============================================

async fn cmd_template(action: TemplateAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    match action {
        TemplateAction::List {
            source,
            project,
            template_type,
            level,
            keyword,
            enabled,
            owned_by,
            stats,
        } => {
            let templates = match source.as_str() {
                "mine" => client.my_templates(template_type).await?,
                "system" => client.system_templates(template_type).await?,
                "project" => {
                    let project_id = project
                        .as_deref()
                        .context("--project is required with --source project")?;
                    client.project_templates(project_id, template_type).await?
                }
                other => bail!("Unknown source '{}': use mine, system or project", other),
            };

            let filter = TemplateFilter::new(FilterOptions {
                template_type,
                level,
                keyword: keyword.unwrap_or_default(),
                enabled,
                project_id: owned_by,
            });
            let filtered = filter.apply(&templates);

            if stats {
                print_template_stats(&templates, &filtered);
                return Ok(());
            }

            if filtered.is_empty() {
                println!("No templates found.");
                return Ok(());
            }

            println!("{}", "Templates:".bold());
            for template in &filtered {
                println!("  {}", template_line(template));
            }
        }

        TemplateAction::Get { id } => {
            let template = client.get_template(&id).await?;
            print_template(&template);
        }

        TemplateAction::Add {
            name,
            template_type,
            level,
            content,
            file,
            description,
            project,
            disabled,
        } => {
            let content = content_from(content, file, "content")?;
            let request = PromptTemplateRequest {
                name,
                template_type,
                level,
                content,
                description,
                project_id: project,
                user_id: None,
                enabled: Some(!disabled),
            };
            let template = client.create_template(&request).await?;
            println!("{} Template created: {}", "✓".green(), template.id.cyan());
        }

        TemplateAction::Update {
            id,
            name,
            file,
            description,
            enabled,
        } => {
            let current = client.get_template(&id).await?;

            let content = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path))?,
                None => current.content.clone(),
            };
            let request = PromptTemplateRequest {
                name: name.unwrap_or(current.name),
                template_type: current.template_type,
                level: current.level,
                content,
                description: description.or(current.description),
                project_id: current.project_id,
                user_id: current.user_id,
                enabled: enabled.or(Some(current.enabled)),
            };
            let template = client.update_template(&id, &request).await?;
            println!("{} Template updated: {}", "✓".green(), template.id.cyan());
        }

        TemplateAction::Delete { id } => {
            client.delete_template(&id).await?;
            println!("{} Template deleted", "✓".green());
        }

        TemplateAction::Effective {
            template_type,
            project,
        } => {
            let template = client
                .effective_template(template_type, project.as_deref())
                .await?;
            print_template(&template);
        }

        TemplateAction::SystemDefault { template_type } => {
            let template = client.system_default_template(template_type).await?;
            print_template(&template);
        }
    }

    Ok(())
}

fn template_line(template: &PromptTemplate) -> String {
    let marker = if template.enabled {
        "●".green()
    } else {
        "○".red()
    };
    format!(
        "{} {} {} {}/{}",
        marker,
        template.id.dimmed(),
        template.name.cyan(),
        template.level,
        template.template_type.to_string().dimmed()
    )
}

fn print_template(template: &PromptTemplate) {
    println!(
        "{} {}/{} {}",
        template.name.cyan().bold(),
        template.level,
        template.template_type,
        if template.enabled {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
    println!("  id: {}", template.id.dimmed());
    if let Some(description) = &template.description {
        println!("  {}", description);
    }
    println!("\n{}", template.content);
}

fn print_template_stats(
    templates: &[PromptTemplate],
    filtered: &[&PromptTemplate],
) {
    let stats = statistics(templates, filtered);
    let by_type = group_by_type(filtered);
    let by_level = group_by_level(filtered);

    println!("{}", "Template statistics:".bold());
    println!("  total: {}  filtered: {}", stats.total, stats.filtered);
    println!(
        "  by type: clarification {}  optimization {}",
        stats.clarification, stats.optimization
    );
    println!(
        "  by level: system {}  project {}  user {}",
        stats.system, stats.project, stats.user
    );
    println!(
        "  enabled: {}  disabled: {}",
        stats.enabled.to_string().green(),
        stats.disabled.to_string().red()
    );
    println!(
        "  filtered buckets: {} clarification / {} optimization, {} system / {} project / {} user",
        by_type.clarification.len(),
        by_type.optimization.len(),
        by_level.system.len(),
        by_level.project.len(),
        by_level.user.len()
    );
}

// ============================================
// AI commands
// ============================================

async fn cmd_ai(action: AiAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    match action {
        AiAction::Clarify {
            requirement,
            file,
            title,
            context,
            project,
            template,
            provider,
        } => {
            let request = RequirementClarificationRequest {
                original_requirement: content_from(requirement, file, "requirement")?,
                title,
                project_context: context,
                project_id: project,
                prompt_template_id: template,
                provider,
            };
            let response = client.clarify_requirement(&request).await?;

            if !response.success {
                bail!(
                    "Clarification failed: {}",
                    response.message.unwrap_or_else(|| "unknown error".to_string())
                );
            }

            println!("{}", "Clarification questions:".bold());
            for (index, question) in response.questions.iter().enumerate() {
                println!(
                    "  {}. [{}] {}",
                    index + 1,
                    question.category.dimmed(),
                    question.question
                );
            }
        }

        AiAction::Optimize {
            requirement,
            file,
            answers,
            title,
            context,
            project,
            template,
            provider,
        } => {
            let clarification_answers: Vec<ClarificationQA> = match answers {
                Some(path) => {
                    let content = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {}", path))?;
                    serde_json::from_str(&content)
                        .with_context(|| format!("Invalid answers payload in {}", path))?
                }
                None => Vec::new(),
            };

            let request = RequirementOptimizationRequest {
                original_requirement: content_from(requirement, file, "requirement")?,
                title,
                project_context: context,
                project_id: project,
                prompt_template_id: template,
                provider,
                clarification_answers,
            };
            let response = client.optimize_requirement(&request).await?;

            if !response.success {
                bail!(
                    "Optimization failed: {}",
                    response.message.unwrap_or_else(|| "unknown error".to_string())
                );
            }

            println!("{}", "Optimized requirement:".bold());
            println!("{}\n", response.optimized_requirement);
            println!("{}", "User story:".bold());
            println!("{}\n", response.user_story);
            println!("{}", "Acceptance criteria:".bold());
            println!("{}\n", response.acceptance_criteria);
            println!("{}", "Technical notes:".bold());
            println!("{}", response.technical_notes);
        }

        AiAction::OptimizeStory {
            title,
            description,
            file,
            context,
            additional,
            provider,
        } => {
            let request = UserStoryOptimizationRequest {
                description: content_from(description, file, "description")?,
                title,
                project_context: context,
                additional_requirements: additional,
                provider,
            };
            let response = client.optimize_user_story(&request).await?;

            if !response.success {
                bail!(
                    "Optimization failed: {}",
                    response.message.unwrap_or_else(|| "unknown error".to_string())
                );
            }

            println!("{}", "Optimized description:".bold());
            println!("{}\n", response.optimized_description);
            println!("{}", "Acceptance criteria:".bold());
            println!("{}\n", response.acceptance_criteria);
            println!("{}", "Definition of done:".bold());
            println!("{}", response.definition_of_done);
        }

        AiAction::TestCases {
            description,
            file,
            optimized,
            context,
            provider,
        } => {
            let request = TestCaseGenerationRequest {
                description: content_from(description, file, "description")?,
                optimized_description: optimized,
                project_context: context,
                provider,
            };
            let response = client.generate_test_cases(&request).await?;

            if !response.success {
                bail!(
                    "Generation failed: {}",
                    response.message.unwrap_or_else(|| "unknown error".to_string())
                );
            }

            println!("{}", "Test cases:".bold());
            for (index, case) in response.test_cases.iter().enumerate() {
                println!("  {}. {}", index + 1, case);
            }
        }
    }

    Ok(())
}

// ============================================
// Config command
// ============================================

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  Identity: {}",
        if config.did.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    if let Some(username) = &config.username {
        println!("  Logged in as: {}", username.cyan());
    }

    Ok(())
}
