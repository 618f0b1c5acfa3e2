#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};
use url::Url;

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            max_connections: 20,
            min_connections: 2,
        }
    }

    /// Connection string with credentials spliced in.
    ///
    /// Credentials already present in `url` take precedence; `user` and
    /// `password` are percent-encoded and only inserted when the URL has no
    /// userinfo part.
    pub fn connection_url(&self) -> String {
        let Some(user) = self.user.as_deref().filter(|u| !u.is_empty()) else {
            return self.url.clone();
        };
        let Ok(mut url) = Url::parse(&self.url) else {
            return self.url.clone();
        };
        if !url.username().is_empty() {
            return self.url.clone();
        }

        let password = self.password.as_deref().filter(|p| !p.is_empty());
        if url.set_username(user).is_err() || url.set_password(password).is_err() {
            return self.url.clone();
        }
        url.into()
    }

    /// The URL with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        let Ok(mut url) = Url::parse(&self.connection_url()) else {
            return "<unparseable database url>".to_string();
        };
        if url.password().is_some() && url.set_password(Some("***")).is_err() {
            return "<unparseable database url>".to_string();
        }
        url.into()
    }
}

/// Open the connection pool described by `config`.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!(url = %config.redacted_url(), "Connecting to database...");

    let opts = ConnectOptions::new(config.connection_url())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!("Database connected (pool: {})", config.max_connections);

    Ok(conn)
}
