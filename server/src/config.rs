//! Environment-driven configuration, loaded once at startup.

use std::env;

use crate::auth::{AuthMode, DEV_CALLER_ID};

/// Origins allowed when ALLOWED_ORIGINS is not set: the deployed frontend
/// plus the local dev servers.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:5174",
    "https://recipe-app-frontend.vercel.app",
];

pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Endpoint of the external generation collaborator.
    pub webhook_url: String,
    pub allowed_origins: Vec<String>,
    pub auth: AuthMode,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Panics with a clear message when a required variable is missing;
    /// the server cannot run without them.
    pub fn load() -> Self {
        let port = env::var("PORT")
            .ok()
            .map(|p| p.parse().expect("PORT must be a number"))
            .unwrap_or(5000);

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let webhook_url = env::var("N8N_WEBHOOK_URL").expect("N8N_WEBHOOK_URL must be set");

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        };

        let auth = AuthMode::from_secret(env::var("SUPABASE_JWT_SECRET").ok().as_deref());
        if matches!(auth, AuthMode::DevPermissive) {
            tracing::warn!(
                "SUPABASE_JWT_SECRET not set, auth is permissive: every caller becomes {}",
                DEV_CALLER_ID
            );
        }

        Self {
            port,
            database_url,
            webhook_url,
            allowed_origins,
            auth,
        }
    }
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
