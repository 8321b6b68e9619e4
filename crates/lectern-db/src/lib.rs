pub mod certificate;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod module;
pub mod program;
pub mod progress;
pub mod quiz;
pub mod review;
pub mod schema;
pub mod user;
pub mod util;

pub use sea_orm;
