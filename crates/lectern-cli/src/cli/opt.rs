use clap::{Args, Parser, Subcommand};
use lectern_utils::args::db::DbArgs;
use lectern_utils::args::learning::LearningArgs;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "lectern", about = "Inspect and repair learner progress")]
pub(crate) struct Cli {
    #[arg(long = "sentry-dsn", env = "SENTRY_DSN", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry")]
    pub(crate) env: String,

    #[command(flatten)]
    pub(crate) db: DbArgs,

    #[command(flatten)]
    pub(crate) learning: LearningArgs,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Create all tables that do not exist yet
    Schema,
    /// Show the progress of a user in a course, fixing a stale percentage
    Progress(CourseArgs),
    /// Show the progress of a user in every course of a program
    Overview(ProgramArgs),
    /// Mark a content as watched
    Watch(Watch),
    /// Certify a user if every course of the program is complete
    Promote(ProgramArgs),
    Certificate(Certificate),
    Delete(Delete),
}

#[derive(Debug, Args)]
pub(crate) struct CourseArgs {
    pub(crate) user_id: Uuid,
    pub(crate) course_id: Uuid,
}

#[derive(Debug, Args)]
pub(crate) struct ProgramArgs {
    pub(crate) user_id: Uuid,
    pub(crate) program_id: Uuid,
}

#[derive(Debug, Args)]
pub(crate) struct Watch {
    pub(crate) user_id: Uuid,
    pub(crate) course_id: Uuid,
    pub(crate) content_id: Uuid,
}

#[derive(Debug, Args)]
pub(crate) struct Certificate {
    pub(crate) user_id: Uuid,
    pub(crate) course_id: Uuid,

    #[arg(long, help = "Issue the certificate if the quiz average is high enough")]
    pub(crate) issue: bool,
}

#[derive(Debug, Args)]
pub(crate) struct Delete {
    #[command(subcommand)]
    pub(crate) target: DeleteTarget,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub(crate) enum DeleteTarget {
    Content { id: Uuid },
    Module { id: Uuid },
    Course { id: Uuid },
    Program { id: Uuid },
}
