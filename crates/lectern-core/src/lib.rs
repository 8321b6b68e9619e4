pub mod config;
pub mod deletion;
pub mod enrollment;
pub mod grading;
pub mod progress;
pub mod promotion;
pub mod review;
pub mod sequence;

pub use config::LearningConfig;
