use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;
use console::Style;

use autopass::{GenerationOptions, GenerationRequest, HistoryEntry, StrengthLabel, StrengthResult};

use crate::{GenerateArgs, ProgError, Session};

impl GenerateArgs {
    /// The configured options, with anything switched off on the command line removed.
    fn options(&self, configured: GenerationOptions) -> GenerationOptions {
        GenerationOptions {
            uppercase: configured.uppercase && !self.no_uppercase,
            numbers: configured.numbers && !self.no_numbers,
            symbols: configured.symbols && !self.no_symbols,
        }
    }
}

pub(crate) fn generate_password(
    session: &mut Session,
    args: GenerateArgs,
    hint: Option<String>,
) -> Result<(), ProgError> {
    if let Some(hint) = hint.as_deref() {
        if hint.trim().is_empty() {
            return Err(ProgError::EmptyHint);
        }
    }
    let request = GenerationRequest {
        length: args.length.unwrap_or(session.settings.length),
        options: args.options(session.settings.options),
        hint,
    };

    let mut rng = rand::thread_rng();
    let password = request.generate(&mut rng)?;
    let entry = HistoryEntry::new(password, request.mode());

    println!("{}", entry.password.as_str());
    print_strength(&entry.strength);

    if args.copy {
        send_to_clipboard(entry.password.as_str().as_bytes())?;
        eprintln!("Copied to the clipboard.");
    }
    if !args.no_save {
        session.history.record(entry);
        session.save_history()?;
    }
    Ok(())
}

pub(crate) fn score_password(password: Option<String>) -> Result<(), ProgError> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")
            .context("failed to read password from TTY")?,
    };
    print_strength(&autopass::strength::score(&password));
    Ok(())
}

fn print_strength(strength: &StrengthResult) {
    eprintln!(
        "Strength: {} ({}/100)",
        label_style(strength.label).apply_to(strength.label),
        strength.score
    );
}

pub(crate) fn label_style(label: StrengthLabel) -> Style {
    match label {
        StrengthLabel::Weak => Style::new().red(),
        StrengthLabel::Fair => Style::new().yellow(),
        StrengthLabel::Good => Style::new().green(),
        StrengthLabel::Strong => Style::new().green().bright().bold(),
    }
}

pub(crate) fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut cmd = clipboard_cmd();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start {:?} to copy to the clipboard", cmd))?;
    child
        .stdin
        .as_mut()
        .context("clipboard command has no stdin")?
        .write_all(data)?;
    child.wait()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_only_switches_classes_off() {
        let args = GenerateArgs {
            length: None,
            no_uppercase: false,
            no_numbers: true,
            no_symbols: false,
            copy: false,
            no_save: false,
        };
        let configured = GenerationOptions {
            uppercase: true,
            numbers: true,
            symbols: false,
        };
        assert_eq!(
            args.options(configured),
            GenerationOptions {
                uppercase: true,
                numbers: false,
                symbols: false,
            }
        );
    }
}
