use axum::http::{HeaderValue, Method, request::Parts};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";

pub struct Config {
    pub host: String,
    pub port: u16,
    pub client_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: var("HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            client_url: var("CLIENT_URL").filter(|url| !url.is_empty()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors(&self) -> CorsConfig {
        let mut cors = CorsConfig::default();
        if let Some(url) = &self.client_url {
            cors.origins.insert(0, url.clone());
        }
        cors
    }
}

/// Browser origins allowed to talk to the server
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Exact origins, e.g. `http://localhost:5173`
    pub origins: Vec<String>,
    /// Host suffixes accepted for any origin, e.g. preview deployments
    pub origin_suffixes: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            origin_suffixes: vec![".vercel.app".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
            || self
                .origin_suffixes
                .iter()
                .any(|suffix| origin.ends_with(suffix.as_str()))
    }

    pub fn layer(&self) -> CorsLayer {
        let cors = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _: &Parts| {
                    origin.to_str().is_ok_and(|origin| cors.allows(origin))
                },
            ))
            .allow_methods([Method::GET, Method::POST])
            .allow_credentials(true)
    }
}
