use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::templates_errors::{Result, TemplateError};

/// Sentinel cycle number meaning "ask this question at every check-in".
pub const ASK_EVERY_CYCLE: i32 = -1;

pub const RESPONSE_TYPE_TEXT: &str = "text";
pub const RESPONSE_TYPE_SELECT: &str = "select";

/// An ordered, reusable set of check-in questions. System templates carry no
/// creator; custom templates belong to the user who made them.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub is_custom: bool,
    pub creator_id: Option<String>,
}

impl Template {
    pub fn is_system(&self) -> bool {
        self.creator_id.is_none()
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(Template))]
#[diesel(table_name = crate::schema::questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub template_id: String,
    pub text: String,
    pub response_type: String,
    /// Cycle number this question is asked at, or [`ASK_EVERY_CYCLE`].
    pub check_in_num: i32,
    pub position: i32,
}

impl Question {
    /// Whether this question belongs in the check-in for `cycle`.
    pub fn asked_at_cycle(&self, cycle: i32) -> bool {
        self.check_in_num == ASK_EVERY_CYCLE || self.check_in_num == cycle
    }
}

/// Input model for one question of a new template.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub text: String,
    #[serde(default = "default_response_type")]
    pub response_type: String,
    #[serde(default = "default_check_in_num")]
    pub check_in_num: i32,
}

fn default_response_type() -> String {
    RESPONSE_TYPE_TEXT.to_string()
}

fn default_check_in_num() -> i32 {
    ASK_EVERY_CYCLE
}

/// Input model for creating a custom template.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub questions: Vec<NewQuestion>,
}

impl NewTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::InvalidData(
                "Template name cannot be empty".to_string(),
            ));
        }
        if self.questions.is_empty() {
            return Err(TemplateError::InvalidData(
                "A template needs at least one question".to_string(),
            ));
        }
        for question in &self.questions {
            if question.text.trim().is_empty() {
                return Err(TemplateError::InvalidData(
                    "Question text cannot be empty".to_string(),
                ));
            }
            if question.response_type != RESPONSE_TYPE_TEXT
                && question.response_type != RESPONSE_TYPE_SELECT
            {
                return Err(TemplateError::InvalidData(format!(
                    "Unknown response type '{}'",
                    question.response_type
                )));
            }
            if question.check_in_num < ASK_EVERY_CYCLE || question.check_in_num == 0 {
                return Err(TemplateError::InvalidData(format!(
                    "Invalid question cycle number {}",
                    question.check_in_num
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(cycle: i32) -> Question {
        Question {
            id: "q1".to_string(),
            template_id: "t1".to_string(),
            text: "How did it go?".to_string(),
            response_type: RESPONSE_TYPE_TEXT.to_string(),
            check_in_num: cycle,
            position: 0,
        }
    }

    #[test]
    fn every_cycle_questions_match_any_cycle() {
        let q = question(ASK_EVERY_CYCLE);
        assert!(q.asked_at_cycle(1));
        assert!(q.asked_at_cycle(12));
    }

    #[test]
    fn cycle_specific_questions_match_only_their_cycle() {
        let q = question(3);
        assert!(q.asked_at_cycle(3));
        assert!(!q.asked_at_cycle(1));
        assert!(!q.asked_at_cycle(4));
    }

    #[test]
    fn template_validation_rejects_bad_input() {
        let mut t = NewTemplate {
            name: "Running".to_string(),
            questions: vec![NewQuestion {
                text: "Distance this week?".to_string(),
                response_type: RESPONSE_TYPE_TEXT.to_string(),
                check_in_num: ASK_EVERY_CYCLE,
            }],
        };
        assert!(t.validate().is_ok());

        t.questions[0].check_in_num = 0;
        assert!(t.validate().is_err());

        t.questions[0].check_in_num = ASK_EVERY_CYCLE;
        t.questions[0].response_type = "dropdown".to_string();
        assert!(t.validate().is_err());

        t.questions.clear();
        assert!(t.validate().is_err());
    }
}
