pub mod templates_errors;
pub mod templates_model;
pub mod templates_repository;
pub mod templates_service;
pub mod templates_traits;

pub use templates_errors::{Result, TemplateError};
pub use templates_model::{
    NewQuestion, NewTemplate, Question, Template, ASK_EVERY_CYCLE, RESPONSE_TYPE_SELECT,
    RESPONSE_TYPE_TEXT,
};
pub use templates_repository::TemplateRepository;
pub use templates_service::TemplateService;
pub use templates_traits::{TemplateRepositoryTrait, TemplateServiceTrait};
