use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::goals::Goal;
use crate::templates::Question;

/// One recorded answer, tagged with the cycle it was submitted for. The
/// response history is the only record of past check-ins.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(Goal))]
#[diesel(belongs_to(Question))]
#[diesel(table_name = crate::schema::responses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub goal_id: String,
    pub question_id: String,
    pub text: String,
    pub check_in_number: i32,
}

/// One answer within a submission batch.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckInAnswer {
    pub question_id: String,
    pub text: String,
}

/// A check-in submission: answers for the goal's current cycle. Accepted or
/// rejected as a whole.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSubmission {
    pub goal_id: String,
    pub answers: Vec<CheckInAnswer>,
}
