//! Terminal implementations of the UI collaborators, plus prompts.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use sessionkit_core::{Navigator, Notifier};
use tracing::debug;

/// Prints success messages to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Remembers the last route the flow asked for.
///
/// A terminal has no pages; commands look at the route afterwards to decide
/// what to print next.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<String>>,
}

impl TerminalNavigator {
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn push(&self, path: &str) {
        debug!(path, "Navigate");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }
}

/// Prompt for a line of input, falling back to `default` on empty input.
pub fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(default) => print!("{} [{}]: ", label, default),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match default {
        Some(default) if input.is_empty() => default.to_string(),
        _ => input.to_string(),
    })
}

pub fn prompt_password(label: &str) -> Result<String> {
    let password = rpassword::prompt_password(format!("{}: ", label))?;
    Ok(password)
}

/// Show only the ends of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}
