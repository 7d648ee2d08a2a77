//! Operations on the password history.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;

use crate::{ProgError, Session};

pub(crate) fn list_history(session: &Session) -> Result<(), ProgError> {
    if session.history.is_empty() {
        eprintln!("No passwords generated yet.");
        return Ok(());
    }

    struct HistoryRow {
        number: String,
        password: String,
        mode: String,
        strength: String,
    }

    impl crate::table::TableDisplay for HistoryRow {
        fn columns() -> usize {
            4
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "#",
                1 => "Password",
                2 => "Mode",
                3 => "Strength",
                _ => panic!(),
            }
        }

        fn item(&self, column_index: usize) -> &str {
            match column_index {
                0 => &self.number,
                1 => &self.password,
                2 => &self.mode,
                3 => &self.strength,
                _ => panic!(),
            }
        }
    }

    let rows = session
        .history
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryRow {
            number: (index + 1).to_string(),
            password: entry.password.as_str().to_owned(),
            mode: entry.mode.to_string(),
            strength: format!("{} ({})", entry.strength.label, entry.strength.score),
        })
        .collect::<Vec<_>>();
    crate::table::display_table(&rows, std::io::stdout()).context("failed to output table")?;

    Ok(())
}

pub(crate) fn copy_entry(session: &Session) -> Result<(), ProgError> {
    let index = crate::select::select_entry(&session.history)?;
    let entry = session
        .history
        .get(index)
        .expect("the selected entry should always exist in the history");
    crate::generate::send_to_clipboard(entry.password.as_str().as_bytes())?;
    eprintln!("Copied to the clipboard.");
    Ok(())
}

pub(crate) fn remove_entry(session: &mut Session) -> Result<(), ProgError> {
    let index = crate::select::select_entry(&session.history)?;
    eprintln!("This will remove entry #{} from the history.", index + 1);
    let confirm_delete = dialoguer::Confirm::new()
        .with_prompt("Remove?")
        .default(false)
        .interact()
        .context("failed to prompt you, somehow")?;
    if !confirm_delete {
        return Err(ProgError::DeleteAborted);
    }
    let was_removed = session.history.remove(index).is_some();
    assert!(was_removed);
    session.save_history()?;
    eprintln!("Password removed.");
    Ok(())
}

pub(crate) fn clear_history(session: &mut Session) -> Result<(), ProgError> {
    if session.history.is_empty() {
        eprintln!("History is already empty.");
        return Ok(());
    }
    eprintln!(
        "This will remove all {} passwords from the history.",
        session.history.len()
    );
    let confirm_clear = dialoguer::Confirm::new()
        .with_prompt("Clear?")
        .default(false)
        .interact()
        .context("failed to prompt you, somehow")?;
    if !confirm_clear {
        return Err(ProgError::ClearAborted);
    }
    session.history.clear();
    session.save_history()?;
    eprintln!("All passwords cleared.");
    Ok(())
}

pub(crate) fn export_history(session: &Session, output: Option<PathBuf>) -> Result<(), ProgError> {
    if session.history.is_empty() {
        return Err(ProgError::NothingToExport);
    }
    let now = chrono::Local::now();
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!("passwords_{}.txt", now.timestamp_millis()))
    });

    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    session
        .history
        .export_text(&mut writer, &now.format("%Y-%m-%d %H:%M:%S").to_string())
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write passwords to {}", output.display()))?;

    eprintln!(
        "Exported {} passwords to {}.",
        session.history.len(),
        output.display()
    );
    Ok(())
}
