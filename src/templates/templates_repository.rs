use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{DbConnection, DbPool};
use crate::schema::{questions, templates};

use super::templates_errors::{Result, TemplateError};
use super::templates_model::{Question, Template, ASK_EVERY_CYCLE};
use super::templates_traits::TemplateRepositoryTrait;

pub struct TemplateRepository {
    pool: Arc<DbPool>,
}

impl TemplateRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TemplateRepository { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|e| TemplateError::DatabaseError(e.to_string()))
    }
}

impl TemplateRepositoryTrait for TemplateRepository {
    fn get_by_id(&self, template_id: &str) -> Result<Template> {
        let mut conn = self.conn()?;
        Ok(templates::table.find(template_id).first(&mut conn)?)
    }

    fn load_templates(&self, owner_id: &str) -> Result<Vec<Template>> {
        let mut conn = self.conn()?;
        Ok(templates::table
            .filter(
                templates::creator_id
                    .eq(owner_id.to_string())
                    .or(templates::creator_id.is_null()),
            )
            .order(templates::name.asc())
            .load::<Template>(&mut conn)?)
    }

    fn insert_template(&self, template: Template, question_rows: Vec<Question>) -> Result<Template> {
        let mut conn = self.conn()?;

        conn.transaction::<Template, TemplateError, _>(|conn| {
            diesel::insert_into(templates::table)
                .values(&template)
                .execute(conn)?;

            diesel::insert_into(questions::table)
                .values(&question_rows)
                .execute(conn)?;

            Ok(templates::table.find(&template.id).first(conn)?)
        })
    }

    fn delete_template(&self, template_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;
        Ok(diesel::delete(templates::table.find(template_id)).execute(&mut conn)?)
    }

    fn load_questions(&self, template_id: &str) -> Result<Vec<Question>> {
        let mut conn = self.conn()?;
        Ok(questions::table
            .filter(questions::template_id.eq(template_id))
            .order(questions::position.asc())
            .load::<Question>(&mut conn)?)
    }

    fn questions_for_cycle(&self, template_id: &str, cycle: i32) -> Result<Vec<Question>> {
        let mut conn = self.conn()?;
        Ok(questions::table
            .filter(questions::template_id.eq(template_id))
            .filter(
                questions::check_in_num
                    .eq(ASK_EVERY_CYCLE)
                    .or(questions::check_in_num.eq(cycle)),
            )
            .order(questions::position.asc())
            .load::<Question>(&mut conn)?)
    }
}
