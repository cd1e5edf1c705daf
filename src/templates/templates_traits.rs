use super::templates_errors::Result;
use super::templates_model::{NewTemplate, Question, Template};

/// Trait for template repository operations
pub trait TemplateRepositoryTrait: Send + Sync {
    fn get_by_id(&self, template_id: &str) -> Result<Template>;
    /// A user's own custom templates plus the system-owned ones.
    fn load_templates(&self, owner_id: &str) -> Result<Vec<Template>>;
    fn insert_template(&self, template: Template, questions: Vec<Question>) -> Result<Template>;
    fn delete_template(&self, template_id: &str) -> Result<usize>;
    fn load_questions(&self, template_id: &str) -> Result<Vec<Question>>;
    /// Questions asked at `cycle`: cycle-specific ones plus the
    /// ask-every-cycle ones, in template order.
    fn questions_for_cycle(&self, template_id: &str, cycle: i32) -> Result<Vec<Question>>;
}

/// Trait for template service operations
pub trait TemplateServiceTrait: Send + Sync {
    fn create_template(&self, actor_id: &str, new_template: NewTemplate) -> Result<Template>;
    fn get_template(&self, template_id: &str) -> Result<Template>;
    fn get_templates(&self, actor_id: &str) -> Result<Vec<Template>>;
    fn get_questions(&self, template_id: &str) -> Result<Vec<Question>>;
    fn delete_template(&self, actor_id: &str, template_id: &str) -> Result<usize>;
}
