use chrono::{Local, TimeZone};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::client::Task;
use crate::config::Config;

const DESCRIPTION_WIDTH: usize = 60;

/// Spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn succeed(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    println!("{} {}", "✓".green(), message.green());
}

pub fn fail(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    println!("{} {}", "✗".red(), message.red());
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

pub fn format_date(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

pub fn is_overdue(task: &Task, now_millis: i64) -> bool {
    !task.completed
        && task
            .deadline
            .as_ref()
            .and_then(|d| d.deadline)
            .map(|deadline| deadline < now_millis)
            .unwrap_or(false)
}

/// Lines rendered for one task; `index` is zero-based.
pub fn task_lines(index: usize, task: &Task, now_millis: i64) -> Vec<String> {
    let mut lines = Vec::new();

    let status = if task.completed {
        "✓".green()
    } else {
        "○".dimmed()
    };
    let title = if task.completed {
        task.title.dimmed().strikethrough()
    } else {
        task.title.white()
    };
    lines.push(format!("{} {} {}", status, format!("{}.", index + 1).dimmed(), title));

    if let Some(description) = task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("   {}", truncate(description, DESCRIPTION_WIDTH)).dimmed().to_string());
    }

    if let Some(date) = task
        .deadline
        .as_ref()
        .and_then(|d| d.deadline)
        .and_then(format_date)
    {
        if is_overdue(task, now_millis) {
            lines.push(format!("   ⏰ {}", date).red().to_string());
        } else {
            lines.push(format!("   📅 {}", date).dimmed().to_string());
        }
    }

    lines
}

pub fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".yellow());
        return;
    }

    println!("{}", format!("Found {} task(s):\n", tasks.len()).bold());
    let now = Local::now().timestamp_millis();
    for (index, task) in tasks.iter().enumerate() {
        for line in task_lines(index, task, now) {
            println!("{}", line);
        }
    }
}

pub fn print_config(config: &Config, path: &Path) {
    println!("{}", "\n⚙️  Yougile CLI Configuration\n".bold().cyan());
    println!("{}", format!("Config file: {}\n", path.display()).dimmed());

    println!("{}", "API Settings:".white());
    println!("  Host: {}", config.api_host.cyan());
    println!("  Key:  {}", config.masked_api_key().cyan());

    println!("{}", "\nDefaults:".white());
    print_default("Project:", &config.default_project_id, &config.default_project_name);
    print_default("Board:  ", &config.default_board_id, &config.default_board_name);
    print_default("Column: ", &config.default_column_id, &config.default_column_name);
    println!();
}

fn print_default(label: &str, id: &Option<String>, name: &Option<String>) {
    match (id, name) {
        (Some(id), name) => {
            println!("  {} {}", label, name.as_deref().unwrap_or(id.as_str()).cyan())
        }
        (None, _) => println!("{}", format!("  {} not set", label).dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Deadline;

    fn task(completed: bool, deadline: Option<i64>) -> Task {
        Task {
            id: "t1".into(),
            title: "Write docs".into(),
            description: Some("x".repeat(80)),
            column_id: Some("col1".into()),
            assigned: Vec::new(),
            deadline: deadline.map(|millis| Deadline {
                deadline: Some(millis),
                start_date: None,
                with_time: Some(false),
            }),
            completed,
            archived: false,
        }
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("привет мир", 6), "привет...");
    }

    #[test]
    fn overdue_only_when_open_and_past() {
        let now = 2_000_000_000_000;
        assert!(is_overdue(&task(false, Some(now - 1)), now));
        assert!(!is_overdue(&task(true, Some(now - 1)), now));
        assert!(!is_overdue(&task(false, Some(now + 1)), now));
        assert!(!is_overdue(&task(false, None), now));
    }

    #[test]
    fn task_lines_include_description_and_deadline() {
        let now = 2_000_000_000_000;
        let lines = task_lines(0, &task(false, Some(now - 86_400_000)), now);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Write docs"));
        assert!(lines[1].contains(&format!("{}...", "x".repeat(DESCRIPTION_WIDTH))));
        assert!(lines[2].contains('⏰'));
    }

    #[test]
    fn task_lines_skip_missing_fields() {
        let mut bare = task(true, None);
        bare.description = None;
        assert_eq!(task_lines(4, &bare, 0).len(), 1);
    }
}
