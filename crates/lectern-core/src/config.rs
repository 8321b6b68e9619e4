use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_CERTIFICATE_THRESHOLD: f64 = 60.0;
pub const DEFAULT_DELETION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(TypedBuilder, Debug, Clone)]
pub struct LearningConfig {
    /// Minimum average quiz percentage a certificate is issued for.
    #[builder(default = DEFAULT_CERTIFICATE_THRESHOLD)]
    pub certificate_threshold: f64,
    /// Upper bound for a whole deletion cascade, including program deletes.
    #[builder(default = DEFAULT_DELETION_TIMEOUT)]
    pub deletion_timeout: Duration,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
