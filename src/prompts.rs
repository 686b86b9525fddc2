use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use inquire::{
    validator::Validation, Confirm, MultiSelect, Password, PasswordDisplayMode, Select, Text,
};
use std::error::Error;

use crate::client::Deadline;

const PAGE_SIZE: usize = 10;

fn numbered<T>(items: &[T], label: impl Fn(&T) -> String) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}) {}", i + 1, label(item)))
        .collect()
}

/// Pick one item from a numbered list.
pub fn select<'a, T>(message: &str, items: &'a [T], label: impl Fn(&T) -> String) -> Result<&'a T> {
    let choice = Select::new(message, numbered(items, label))
        .with_page_size(PAGE_SIZE)
        .raw_prompt()
        .context("Failed to read selection")?;
    Ok(&items[choice.index])
}

/// Pick any number of items from a numbered list.
pub fn multi_select<'a, T>(
    message: &str,
    items: &'a [T],
    label: impl Fn(&T) -> String,
) -> Result<Vec<&'a T>> {
    let choices = MultiSelect::new(message, numbered(items, label))
        .with_page_size(PAGE_SIZE)
        .raw_prompt()
        .context("Failed to read selection")?;
    Ok(choices.into_iter().map(|choice| &items[choice.index]).collect())
}

pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Confirm::new(message)
        .with_default(default)
        .prompt()
        .context("Failed to read confirmation")
}

pub fn prompt_email() -> Result<String> {
    let email_validator = |input: &str| -> Result<Validation, Box<dyn Error + Send + Sync>> {
        if input.contains('@') {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid("Enter valid email".into()))
        }
    };

    Text::new("Email:")
        .with_validator(email_validator)
        .prompt()
        .map(|email| email.trim().to_string())
        .context("Failed to read email input")
}

fn masked(message: &str, required: &'static str) -> Result<String> {
    let required_validator = move |input: &str| -> Result<Validation, Box<dyn Error + Send + Sync>> {
        if input.is_empty() {
            Ok(Validation::Invalid(required.into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(required_validator)
        .prompt()
        .context("Failed to read secret input")
}

pub fn prompt_password() -> Result<String> {
    masked("Password:", "Password is required")
}

pub fn prompt_api_key() -> Result<String> {
    masked("Enter your Yougile API key:", "API key is required").map(|key| key.trim().to_string())
}

/// Prompt for a required task title
pub fn prompt_title() -> Result<String> {
    let title_validator = |input: &str| -> Result<Validation, Box<dyn Error + Send + Sync>> {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("Title is required".into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    Text::new("Task title:")
        .with_validator(title_validator)
        .prompt()
        .map(|title| title.trim().to_string())
        .context("Failed to read title input")
}

/// Prompt for an optional description
pub fn prompt_description() -> Result<Option<String>> {
    let description = Text::new("Description (optional, press Enter to skip):")
        .prompt()
        .context("Failed to read description input")?;

    let trimmed = description.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Ask whether to set a deadline, then read the date.
pub fn prompt_deadline() -> Result<Option<Deadline>> {
    if !confirm("Set deadline?", false)? {
        return Ok(None);
    }

    let date_validator = |input: &str| -> Result<Validation, Box<dyn Error + Send + Sync>> {
        if parse_date(input).is_some() {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid(
                "Invalid date format. Use YYYY-MM-DD or DD.MM.YYYY".into(),
            ))
        }
    };

    let input = Text::new("Deadline (YYYY-MM-DD or DD.MM.YYYY):")
        .with_validator(date_validator)
        .prompt()
        .context("Failed to read deadline input")?;

    Ok(parse_date(&input).and_then(deadline_for))
}

/// Accepts `YYYY-MM-DD`, `DD.MM.YYYY` and `DD/MM/YYYY`, with zero-padded fields.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    const FORMATS: [(&str, &str); 3] = [
        ("####-##-##", "%Y-%m-%d"),
        ("##.##.####", "%d.%m.%Y"),
        ("##/##/####", "%d/%m/%Y"),
    ];

    let input = input.trim();
    FORMATS
        .iter()
        .filter(|(shape, _)| matches_shape(input, shape))
        .find_map(|(_, format)| NaiveDate::parse_from_str(input, format).ok())
}

/// `#` in `shape` stands for one ASCII digit; other bytes must match exactly.
fn matches_shape(input: &str, shape: &str) -> bool {
    input.len() == shape.len()
        && input.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'#' => c.is_ascii_digit(),
            _ => c == s,
        })
}

/// Whole-day deadline at local midnight.
pub fn deadline_for(date: NaiveDate) -> Option<Deadline> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let local = Local.from_local_datetime(&midnight).earliest()?;
    Some(Deadline {
        deadline: Some(local.timestamp_millis()),
        start_date: None,
        with_time: Some(false),
    })
}
