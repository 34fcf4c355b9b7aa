use crate::modules::homework::model::HomeworkEntry;

/// Status key to verdict text, as reported by the review service
pub const HOMEWORK_VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),
}

pub fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS
        .iter()
        .find(|(key, _)| *key == status)
        .map(|(_, verdict)| *verdict)
}

/// Render the notification text for a homework entry.
pub fn translate(entry: &HomeworkEntry) -> Result<String, TranslateError> {
    let verdict = verdict_for(&entry.status)
        .ok_or_else(|| TranslateError::UnknownStatus(entry.status.clone()))?;

    tracing::info!(status = %entry.status, homework = %entry.name, "New homework status");

    Ok(format!(
        "Changed review status of \"{}\". {}",
        entry.name, verdict
    ))
}
