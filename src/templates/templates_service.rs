use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use super::templates_errors::{Result, TemplateError};
use super::templates_model::{NewTemplate, Question, Template};
use super::templates_traits::{TemplateRepositoryTrait, TemplateServiceTrait};

pub struct TemplateService<T: TemplateRepositoryTrait> {
    template_repo: Arc<T>,
}

impl<T: TemplateRepositoryTrait> TemplateService<T> {
    pub fn new(template_repo: Arc<T>) -> Self {
        TemplateService { template_repo }
    }
}

impl<T: TemplateRepositoryTrait> TemplateServiceTrait for TemplateService<T> {
    fn create_template(&self, actor_id: &str, new_template: NewTemplate) -> Result<Template> {
        new_template.validate()?;

        let template = Template {
            id: Uuid::new_v4().to_string(),
            name: new_template.name,
            is_custom: true,
            creator_id: Some(actor_id.to_string()),
        };

        let questions = new_template
            .questions
            .into_iter()
            .enumerate()
            .map(|(idx, q)| Question {
                id: Uuid::new_v4().to_string(),
                template_id: template.id.clone(),
                text: q.text,
                response_type: q.response_type,
                check_in_num: q.check_in_num,
                position: idx as i32,
            })
            .collect();

        debug!("Creating template '{}' for user {}", template.name, actor_id);
        self.template_repo.insert_template(template, questions)
    }

    fn get_template(&self, template_id: &str) -> Result<Template> {
        self.template_repo.get_by_id(template_id)
    }

    fn get_templates(&self, actor_id: &str) -> Result<Vec<Template>> {
        self.template_repo.load_templates(actor_id)
    }

    fn get_questions(&self, template_id: &str) -> Result<Vec<Question>> {
        self.template_repo.load_questions(template_id)
    }

    fn delete_template(&self, actor_id: &str, template_id: &str) -> Result<usize> {
        let template = self.template_repo.get_by_id(template_id)?;

        if template.is_system() {
            return Err(TemplateError::Forbidden(
                "System templates cannot be deleted".to_string(),
            ));
        }
        if template.creator_id.as_deref() != Some(actor_id) {
            return Err(TemplateError::Forbidden(format!(
                "Template {} does not belong to user {}",
                template_id, actor_id
            )));
        }

        self.template_repo.delete_template(template_id)
    }
}
