//! Server configuration, sourced from environment variables.

pub struct Config {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path =
            std::env::var("PENSIA_DB_PATH").unwrap_or_else(|_| "data/pensia.db".to_string());
        let listen_addr =
            std::env::var("PENSIA_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());
        Self {
            db_path,
            listen_addr,
        }
    }
}
