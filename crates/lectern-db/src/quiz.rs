pub mod instance;
pub mod question;
pub mod submission;
