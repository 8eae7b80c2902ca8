pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use models::TrainingModel;
pub use repository::{InMemoryTrainingRepository, TrainingRepository};
pub use service::StatsService;
