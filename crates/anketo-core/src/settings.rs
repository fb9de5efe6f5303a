use serde::Deserialize;

/// Report-time configuration, passed explicitly into display formatting and
/// bulk-SQL builds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Restrict bulk reports to each user's most recent submission per
    /// question.
    pub unique_user_response: bool,
    /// strftime pattern for rendering stored dates.
    pub date_format: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            unique_user_response: false,
            date_format: "%d/%m/%Y".to_owned(),
        }
    }
}
