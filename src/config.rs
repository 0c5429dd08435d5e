use std::env;

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    /// When true, deleting a project also deletes its tasks. Defaults to
    /// false, matching the historical orphaning behavior.
    pub cascade_delete: bool,
    /// When true, the auth middleware rejects tokens whose subject user no
    /// longer exists. Defaults to false: a valid token is honored until it
    /// expires.
    pub check_token_subject: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            cascade_delete: env_flag("CASCADE_DELETE"),
            check_token_subject: env_flag("CHECK_TOKEN_SUBJECT"),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("True")
    )
}
