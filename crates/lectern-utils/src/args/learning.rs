use clap::Args;
use lectern_core::LearningConfig;
use lectern_core::config::{DEFAULT_CERTIFICATE_THRESHOLD, DEFAULT_DELETION_TIMEOUT};
use std::time::Duration;

#[derive(Debug, Clone, Args)]
pub struct LearningArgs {
    #[arg(long, default_value_t = DEFAULT_CERTIFICATE_THRESHOLD, help = "Minimum quiz average in percent for a certificate")]
    pub certificate_threshold: f64,

    #[arg(long, default_value_t = DEFAULT_DELETION_TIMEOUT.as_secs(), help = "Time limit for a single delete cascade")]
    pub deletion_timeout_secs: u64,
}

impl From<LearningArgs> for LearningConfig {
    fn from(args: LearningArgs) -> Self {
        LearningConfig::builder()
            .certificate_threshold(args.certificate_threshold)
            .deletion_timeout(Duration::from_secs(args.deletion_timeout_secs))
            .build()
    }
}
