use anyhow::Context;

/// Let the user pick an entry from the history, returning its index.
pub(crate) fn select_entry(history: &autopass::History) -> Result<usize, crate::ProgError> {
    if history.is_empty() {
        return Err(crate::ProgError::HistoryEmpty);
    }
    let items = history
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}. {}  ({}, {})",
                index + 1,
                entry.password.as_str(),
                entry.mode,
                entry.strength.label
            )
        })
        .collect::<Vec<_>>();
    let selection = dialoguer::FuzzySelect::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .items(&items)
        .interact_opt()
        .context("failed to query your selection")?
        .ok_or(crate::ProgError::SelectionCancelled)?;

    Ok(selection)
}
