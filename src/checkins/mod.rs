pub mod checkins_errors;
pub mod checkins_model;
pub mod checkins_repository;
pub mod checkins_service;
pub mod checkins_traits;

pub use checkins_errors::{CheckInError, Result};
pub use checkins_model::{CheckInAnswer, CheckInSubmission, Response};
pub use checkins_repository::CheckInRepository;
pub use checkins_service::CheckInService;
pub use checkins_traits::{CheckInRepositoryTrait, CheckInServiceTrait};
