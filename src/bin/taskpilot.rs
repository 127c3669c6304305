use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::sync::Arc;

use taskpilot::core::Config;
use taskpilot::features::assistant::{Assistant, OpenAiBackend};
use taskpilot::features::notify::{ConsoleNotifier, NotificationSurface};
use taskpilot::features::reminders::{
    DeadlineWatcher, DisabledGenerator, ReminderGenerator, ReminderScheduler,
};
use taskpilot::features::tasks::{HttpTaskSource, JsonFileTaskSource, TaskSource};

const USAGE: &str = "Usage:
  taskpilot [watch]                          Watch task deadlines and show reminders
  taskpilot remind <title> [--by <deadline>] Ask the AI for reminders and schedule them
  taskpilot tips <title>                     Ask the AI for productivity tips
  taskpilot suggest <title>                  Ask the AI for a subtask breakdown";

type OpenAiAssistant = Assistant<OpenAiBackend>;

#[derive(Debug, PartialEq)]
enum Command {
    Watch,
    Remind {
        title: String,
        deadline: Option<String>,
    },
    Tips(String),
    Suggest(String),
    Help,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Watch);
        };

        match name.as_str() {
            "watch" => Ok(Command::Watch),
            "remind" => {
                let (title_args, deadline) = match rest.iter().position(|a| a == "--by") {
                    Some(i) => {
                        let deadline = rest
                            .get(i + 1)
                            .ok_or_else(|| anyhow!("--by needs a deadline\n\n{USAGE}"))?;
                        (&rest[..i], Some(deadline.clone()))
                    }
                    None => (rest, None),
                };
                Ok(Command::Remind {
                    title: joined_title(title_args)?,
                    deadline,
                })
            }
            "tips" => Ok(Command::Tips(joined_title(rest)?)),
            "suggest" => Ok(Command::Suggest(joined_title(rest)?)),
            "-h" | "--help" | "help" => Ok(Command::Help),
            other => Err(anyhow!("Unknown command: {other}\n\n{USAGE}")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    // The openai crate reads credentials from the environment, not from our config
    let assistant = match config.openai_api_key.as_deref() {
        Some(api_key) => {
            std::env::set_var("OPENAI_API_KEY", api_key);
            std::env::set_var("OPENAI_KEY", api_key);
            Some(Arc::new(Assistant::new(OpenAiBackend::new(
                config.openai_model.clone(),
            ))))
        }
        None => None,
    };

    match command {
        Command::Watch => {
            let generator: Arc<dyn ReminderGenerator> = match assistant {
                Some(assistant) => assistant,
                None => {
                    warn!("OPENAI_API_KEY is not set; watching deadlines without AI reminders");
                    Arc::new(DisabledGenerator)
                }
            };
            run_watch(&config, generator).await
        }
        Command::Remind { title, deadline } => {
            let assistant = require_assistant(&config, assistant)?;
            run_remind(&assistant, &title, deadline.as_deref()).await
        }
        Command::Tips(title) => {
            let assistant = require_assistant(&config, assistant)?;
            run_tips(&assistant, &title).await
        }
        Command::Suggest(title) => {
            let assistant = require_assistant(&config, assistant)?;
            run_suggest(&assistant, &title).await
        }
        Command::Help => Ok(()),
    }
}

fn require_assistant(
    config: &Config,
    assistant: Option<Arc<OpenAiAssistant>>,
) -> Result<Arc<OpenAiAssistant>> {
    config.require_openai_key()?;
    assistant.ok_or_else(|| anyhow!("AI backend unavailable"))
}

/// Arguments joined into a single title
fn joined_title(args: &[String]) -> Result<String> {
    let title = args.join(" ");
    if title.trim().is_empty() {
        return Err(anyhow!("Missing title\n\n{USAGE}"));
    }
    Ok(title)
}

async fn run_watch(config: &Config, generator: Arc<dyn ReminderGenerator>) -> Result<()> {
    let source: Arc<dyn TaskSource> = match &config.tasks_url {
        Some(url) => {
            info!("Reading tasks from {url}");
            Arc::new(HttpTaskSource::with_timeout(url, config.tasks_timeout())?)
        }
        None => {
            info!("Reading tasks from {}", config.tasks_file);
            Arc::new(JsonFileTaskSource::new(&config.tasks_file))
        }
    };

    let surface: Arc<dyn NotificationSurface> = Arc::new(ConsoleNotifier);
    let scheduler = Arc::new(ReminderScheduler::new(surface.clone()));
    let watcher = DeadlineWatcher::new(
        source,
        generator,
        scheduler,
        surface,
        config.watcher_config(),
    );

    tokio::select! {
        _ = watcher.run() => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for Ctrl-C: {e}");
            }
            info!("Shutting down; pending reminders discarded");
        }
    }

    Ok(())
}

async fn run_remind(assistant: &OpenAiAssistant, title: &str, deadline: Option<&str>) -> Result<()> {
    let reminders = assistant.reminders(title, deadline).await;
    if reminders.is_empty() {
        println!("No AI reminders suggested");
        return Ok(());
    }

    let scheduler = ReminderScheduler::new(Arc::new(ConsoleNotifier));
    for reminder in &reminders {
        scheduler.schedule(reminder);
    }
    println!("Set {} AI reminders", reminders.len());

    if scheduler.pending() > 0 {
        info!("Waiting for {} scheduled reminders (Ctrl-C to quit)", scheduler.pending());
        tokio::select! {
            _ = scheduler.drain() => {}
            _ = tokio::signal::ctrl_c() => info!("Interrupted; pending reminders discarded"),
        }
    }

    Ok(())
}

async fn run_tips(assistant: &OpenAiAssistant, title: &str) -> Result<()> {
    let tips = assistant.tips(title).await;
    if tips.tips.is_empty() {
        println!("No tips suggested.");
    }
    for tip in &tips.tips {
        println!("- {tip}");
    }
    Ok(())
}

async fn run_suggest(assistant: &OpenAiAssistant, title: &str) -> Result<()> {
    let suggestion = assistant.suggest(title).await;

    if let Some(priority) = &suggestion.priority {
        println!("AI-priority: {priority}");
    }
    if let Some(minutes) = suggestion.estimated_duration {
        println!("Estimated duration: {minutes}m");
    }
    if suggestion.subtasks.is_empty() {
        println!("No subtasks suggested.");
    } else {
        println!("Subtasks:");
        for (i, subtask) in suggestion.subtasks.iter().enumerate() {
            println!("{}. {subtask}", i + 1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Command::parse(&args)
    }

    #[test]
    fn test_help_and_watch_need_no_setup() {
        assert_eq!(parse(&[]).unwrap(), Command::Watch);
        assert_eq!(parse(&["watch"]).unwrap(), Command::Watch);
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_remind_joins_title() {
        assert_eq!(
            parse(&["remind", "Buy", "milk"]).unwrap(),
            Command::Remind {
                title: "Buy milk".to_string(),
                deadline: None,
            }
        );
    }

    #[test]
    fn test_remind_deadline_flag() {
        assert_eq!(
            parse(&["remind", "Buy", "milk", "--by", "2025-09-14T18:00"]).unwrap(),
            Command::Remind {
                title: "Buy milk".to_string(),
                deadline: Some("2025-09-14T18:00".to_string()),
            }
        );
        assert!(parse(&["remind", "Buy milk", "--by"]).is_err());
        assert!(parse(&["remind", "--by", "2025-09-14"]).is_err());
    }

    #[test]
    fn test_tips_and_suggest_join_title() {
        assert_eq!(
            parse(&["tips", "Write", "thesis"]).unwrap(),
            Command::Tips("Write thesis".to_string())
        );
        assert_eq!(
            parse(&["suggest", "Plan", "trip"]).unwrap(),
            Command::Suggest("Plan trip".to_string())
        );
        assert!(parse(&["tips"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse(&["frobnicate"]).is_err());
    }
}
