//! Confirmation channel implementations for the CLI.

use std::io::{self, BufRead, Write};

use patron_engine::ConfirmChannel;

/// Prompts the operator on stdout and reads a numbered answer from
/// stdin. A blank line or unparseable answer counts as cancelled.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl ConfirmChannel for StdinConfirm {
    fn choose(&mut self, prompt: &str, choices: &[&str]) -> Option<usize> {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{prompt}");
        for (index, choice) in choices.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {choice}", index + 1);
        }
        let _ = write!(out, "Choice (blank to skip): ");
        let _ = out.flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return None;
        }
        let answer: usize = line.trim().parse().ok()?;
        (1..=choices.len()).contains(&answer).then(|| answer - 1)
    }
}

/// Parse a `--choices` list (remove/clear/skip) into scripted answers
/// matching the duplicate-resolution choice order.
pub fn parse_choice_script(list: &str) -> anyhow::Result<Vec<Option<usize>>> {
    list.split(',')
        .map(|token| match token.trim().to_lowercase().as_str() {
            "remove" | "remove-row" => Ok(Some(0)),
            "clear" | "clear-cell" => Ok(Some(1)),
            "skip" => Ok(Some(2)),
            other => anyhow::bail!("unknown duplicate choice: {other:?}"),
        })
        .collect()
}
