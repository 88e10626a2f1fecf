use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        database_url: get_env("DATABASE_URL"),
        bind_addr: get_env_or_default("BIND_ADDR", "0.0.0.0:8080"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
        search_timeout_ms: get_env_or_default("SEARCH_TIMEOUT_MS", "5000")
            .parse()
            .expect("SEARCH_TIMEOUT_MS must be an integer"),
    }
});

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    pub search_timeout_ms: u64,
}

fn get_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
