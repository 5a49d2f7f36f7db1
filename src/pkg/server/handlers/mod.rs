pub mod jobs;
pub mod health;
