mod cli;

use anyhow::Result;
use clap::Parser;
use cli::opt;
use lectern_utils::tracing::TracingConfig;
use sea_orm::Database;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = opt::Cli::parse();
    let _guard = lectern_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    tracing::debug!("connecting to database");
    let db = Database::connect(opt.db.connect_options()).await?;
    cli::exec(&db, &opt.learning.into(), opt.command).await
}
