use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_client::{ClientConfig, FormController, ListController, ReqwestTodoApi, TaskList, TodoId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal front-end for the todo service.
#[derive(Parser)]
#[command(name = "todo", version, about)]
struct Cli {
    /// Backend base URL; overrides TODO_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every todo
    List,
    /// Create a todo
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Flip a todo between open and done
    Done { id: TodoId },
    /// Change a todo's title and/or description
    Edit {
        id: TodoId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a todo
    Rm { id: TodoId },
}

fn init_tracing() {
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn render(list: &TaskList) {
    if list.tasks().is_empty() {
        println!("No todos yet. Create one with `todo add <title>`.");
        return;
    }
    let total = list.tasks().len();
    println!(
        "{total} {} ({} open)",
        if total == 1 { "todo" } else { "todos" },
        list.remaining()
    );
    for task in list.tasks() {
        let mark = if task.completed { "x" } else { " " };
        println!(
            "[{mark}] {:>4}  {}  ({})",
            task.id,
            task.title,
            task.created_at.format("%Y-%m-%d")
        );
        if !task.description.is_empty() {
            println!("            {}", task.description);
        }
    }
}

async fn run(command: Command, list: &ListController<ReqwestTodoApi>, form: &FormController<ReqwestTodoApi>) -> anyhow::Result<()> {
    list.load().await?;

    match command {
        Command::List => {}
        Command::Add { title, description } => {
            form.submit(&title, &description).await?;
        }
        Command::Done { id } => list.toggle_complete(id).await?,
        Command::Edit { id, title, description } => {
            list.begin_edit(id)?;
            if let Some(title) = title {
                list.edit_title(title);
            }
            if let Some(description) = description {
                list.edit_description(description);
            }
            list.commit_edit(id).await?;
        }
        Command::Rm { id } => list.remove(id).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let (list, form) = config.controllers();

    let outcome = run(cli.command, &list, &form).await;

    let state = list.snapshot();
    if outcome.is_ok() || !state.tasks().is_empty() {
        render(&state);
    }
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            let message = form
                .snapshot()
                .error()
                .or(state.error())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
