use clap::Args;
use sea_orm::ConnectOptions;

#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    #[arg(long, env = "DATABASE_URL", help = "Database url, e.g. sqlite://lectern.db?mode=rwc")]
    pub db_url: String,

    #[arg(long, help = "Min connections")]
    pub db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub db_max_connections: Option<u32>,
}

impl DbArgs {
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.db_url.clone());
        if let Some(min_connections) = self.db_min_connections {
            options.min_connections(min_connections);
        }
        if let Some(max_connections) = self.db_max_connections {
            options.max_connections(max_connections);
        }
        options.sqlx_logging_level(log::LevelFilter::Debug);
        options
    }
}
