use colored::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Attempts the confirmation prompt makes before giving up on unparseable
/// input. Keeps a scripted or broken stdin from blocking the run forever.
const MAX_PROMPT_ATTEMPTS: usize = 3;

pub fn init() {
    // Enable colored output on Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();
}

pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message.green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message.red());
}

pub fn warn(message: &str) {
    println!("{} {}", style("⚠").yellow(), message.yellow());
}

pub fn hint(message: &str) {
    println!("{} {}", style("💡").cyan(), message.dimmed());
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Ask a yes/no question. Empty input means the default; unparseable input
/// re-prompts up to [`MAX_PROMPT_ATTEMPTS`] times and then declines. A
/// session without an attended terminal declines immediately.
pub fn confirm(message: &str, default: bool) -> bool {
    if !console::user_attended() {
        return false;
    }

    let prompt = format!("{} {}", message, if default { "[Y/n]" } else { "[y/N]" });

    for _ in 0..MAX_PROMPT_ATTEMPTS {
        let line: String = match dialoguer::Input::new()
            .with_prompt(prompt.as_str())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => return false,
        };

        let token = line.trim();
        if token.is_empty() {
            return default;
        }

        match parse_bool(token) {
            Some(answer) => return answer,
            None => error("Enter a correct choice."),
        }
    }

    false
}

/// Parse the common boolean tokens accepted at the confirmation prompt.
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "f" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_tokens() {
        for token in ["y", "Y", "yes", "t", "T", "True", "true", "1", "on", "ON"] {
            assert_eq!(parse_bool(token), Some(true), "token {:?}", token);
        }

        for token in ["n", "N", "no", "f", "F", "False", "false", "0", "off", "OFF"] {
            assert_eq!(parse_bool(token), Some(false), "token {:?}", token);
        }
    }

    #[test]
    fn parse_bool_rejects_garbage() {
        for token in ["maybe", "yep", "2", ""] {
            assert_eq!(parse_bool(token), None, "token {:?}", token);
        }
    }
}
