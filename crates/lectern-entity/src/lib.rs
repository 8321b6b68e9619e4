pub mod certificate;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod module;
pub mod program;
pub mod progress;
pub mod quiz;
pub mod review;
pub mod tier;
pub mod user;

pub use sea_orm;
