use crate::HomeworkRecord;

/// Review statuses the service is known to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Wire code as sent by the service.
    pub fn code(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Localized verdict text shown to the user.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            ReviewStatus::Reviewing => "Работа взята на проверку ревьюером.",
            ReviewStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown review status `{status}` for homework `{name}`")]
pub struct UnknownVerdictError {
    pub name: String,
    pub status: String,
}

/// Builds the notification text for a homework record.
///
/// The output depends only on `(name, status)`, so equal records always yield
/// byte-identical messages; deduplication relies on this.
pub fn extract_verdict(record: &HomeworkRecord) -> Result<String, UnknownVerdictError> {
    let status = ReviewStatus::from_code(&record.status).ok_or_else(|| UnknownVerdictError {
        name: record.name.clone(),
        status: record.status.clone(),
    })?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.name,
        status.verdict()
    ))
}
