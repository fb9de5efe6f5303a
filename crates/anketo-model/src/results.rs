use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One aggregate row of a results page. `even_color` alternates row by row
/// and is consumed by the PDF template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ResultRow {
    pub text: String,
    pub total: u32,
    pub even_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ResultsTotal {
    pub total: String,
}

/// Aggregate handed to the external renderer. The default value is the
/// empty page returned when there are no respondents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ResultsPage {
    pub responses: Vec<ResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<ResultsTotal>,
}

/// Fixed-width row for per-response exports. The trailing value always sits
/// third from the end, behind two empty padding cells; existing table
/// renderers index from the end of the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct ExportRow {
    pub cells: Vec<String>,
}

impl ExportRow {
    pub fn new(leading: Vec<String>, last: String) -> Self {
        let mut cells = leading;
        cells.push(String::new());
        cells.push(String::new());
        cells.push(last);
        Self { cells }
    }
}
