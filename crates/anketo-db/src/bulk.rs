use sea_orm::{DbBackend, Statement, Value};
use std::fmt::Write;
use uuid::Uuid;

/// Table and alias wiring for one response subtable. Each response type
/// supplies its own instance.
#[derive(Debug, Clone, Copy)]
pub struct BulkSqlConfig {
    pub response_table: &'static str,
    pub alias: &'static str,
    /// Alias of the subtable inside the latest-response-per-user subquery.
    pub latest_alias: &'static str,
    /// The text subquery also joins the question table.
    pub latest_joins_question: bool,
}

impl BulkSqlConfig {
    pub const fn new(
        response_table: &'static str,
        alias: &'static str,
        latest_alias: &'static str,
        latest_joins_question: bool,
    ) -> Self {
        Self {
            response_table,
            alias,
            latest_alias,
            latest_joins_question,
        }
    }
}

/// Questionnaire scope of a bulk report: a single questionnaire or a set.
#[derive(Debug, Clone)]
pub enum QuestionnaireFilter {
    One(Uuid),
    Many(Vec<Uuid>),
}

#[derive(Debug, Clone, Default)]
pub struct BulkSqlParams {
    pub response_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub show_incompletes: bool,
    /// Restrict results to each user's most recent submission per question.
    /// Ignored when a user filter is given.
    pub unique_user_response: bool,
}

/// A built bulk query. `values` are bound in placeholder order; that order
/// is the binding contract: questionnaire id(s), completeness, group id,
/// response id or user id.
#[derive(Debug, Clone)]
pub struct BulkSql {
    backend: DbBackend,
    pub sql: String,
    pub values: Vec<Value>,
}

impl BulkSql {
    pub fn statement(&self) -> Statement {
        Statement::from_sql_and_values(self.backend, self.sql.clone(), self.values.clone())
    }
}

struct SqlWriter {
    backend: DbBackend,
    sql: String,
    values: Vec<Value>,
}

impl SqlWriter {
    fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    fn bind(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
        match self.backend {
            // Postgres has no host layer rewriting '?', so number directly
            DbBackend::Postgres => {
                let _ = write!(self.sql, "${}", self.values.len());
            }
            _ => self.sql.push('?'),
        }
    }
}

pub fn build(
    backend: DbBackend,
    config: &BulkSqlConfig,
    questionnaires: &QuestionnaireFilter,
    params: &BulkSqlParams,
) -> BulkSql {
    let alias = config.alias;
    let mut w = SqlWriter {
        backend,
        sql: String::new(),
        values: Vec::new(),
    };

    let _ = write!(
        w.sql,
        "SELECT {alias}.id AS id, qr.submitted, qr.complete, qr.user_id, \
         u.username, u.first_name, u.last_name, qr.id AS rid, \
         {alias}.question_id, {alias}.response\n\
         FROM response qr\n\
         JOIN {table} {alias} ON {alias}.response_id = qr.id\n",
        table = config.response_table,
    );

    // continues the join condition above
    w.push(" AND qr.questionnaire_id ");
    match questionnaires {
        QuestionnaireFilter::One(id) => {
            w.push("= ");
            w.bind(*id);
        }
        QuestionnaireFilter::Many(ids) => {
            w.push("IN (");
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.bind(*id);
            }
            w.push(")");
        }
    }
    if !params.show_incompletes {
        w.push(" AND qr.complete = ");
        w.bind("y");
    }
    w.push("\n");

    w.push("LEFT JOIN response_other qro ON qro.response_id = qr.id\n");
    w.push("LEFT JOIN users u ON u.id = qr.user_id\n");

    if let Some(group_id) = params.group_id {
        w.push("INNER JOIN group_member gm ON gm.group_id = ");
        w.bind(group_id);
        w.push(" AND gm.user_id = qr.user_id\n");
    }

    if params.unique_user_response && params.user_id.is_none() {
        let latest = config.latest_alias;
        let _ = write!(
            w.sql,
            "JOIN (\n\
                 SELECT {latest}.question_id, r.user_id, MAX(r.submitted) AS submitted\n\
                 FROM response r\n\
                 JOIN {table} {latest} ON r.id = {latest}.response_id\n",
            table = config.response_table,
        );
        if config.latest_joins_question {
            let _ = write!(w.sql, "    JOIN question q ON q.id = {latest}.question_id\n");
        }
        if params.show_incompletes {
            w.push("    WHERE r.complete = 'y'\n");
        }
        let _ = write!(
            w.sql,
            "    GROUP BY {latest}.question_id, r.user_id\n\
             ) a ON a.question_id = {alias}.question_id \
             AND a.submitted = qr.submitted AND a.user_id = u.id\n",
        );
    }

    if let Some(response_id) = params.response_id {
        w.push("WHERE qr.id = ");
        w.bind(response_id);
    } else if let Some(user_id) = params.user_id {
        w.push("WHERE qr.user_id = ");
        w.bind(user_id);
    }

    BulkSql {
        backend,
        sql: w.sql,
        values: w.values,
    }
}
