use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

use crate::ocr::ExtractionStrategy;

pub const DEFAULT_STUDENT_EMAIL: &str = "23052873@kiit.ac.in";
pub const DEFAULT_SOCIETY_EMAIL: &str = "usc@kiit.ac.in";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Postgres connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    pub student_email: String,
    pub society_email: String,
    pub tesseract_bin: String,
    pub tesseract_lang: String,
    pub extraction: ExtractionStrategy,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: parse_var("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_var("PORT", DEFAULT_PORT),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            student_email: env::var("STUDENT_DEMO_EMAIL")
                .unwrap_or_else(|_| DEFAULT_STUDENT_EMAIL.to_string()),
            society_email: env::var("SOCIETY_DEMO_EMAIL")
                .unwrap_or_else(|_| DEFAULT_SOCIETY_EMAIL.to_string()),
            tesseract_bin: env::var("TESSERACT_BIN").unwrap_or_else(|_| "tesseract".to_string()),
            tesseract_lang: env::var("TESSERACT_LANG").unwrap_or_else(|_| "eng".to_string()),
            extraction: parse_var("POSTER_EXTRACTION", ExtractionStrategy::default()),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
            student_email: DEFAULT_STUDENT_EMAIL.to_string(),
            society_email: DEFAULT_SOCIETY_EMAIL.to_string(),
            tesseract_bin: "tesseract".to_string(),
            tesseract_lang: "eng".to_string(),
            extraction: ExtractionStrategy::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Config: ignoring invalid {}='{}': {}", name, raw, e);
                default
            }
        },
        Err(_) => default,
    }
}
