//! Runtime configuration read from the environment
//!
//! `main` loads `.env` with dotenvy first, so every value here can come from
//! either the process environment or that file. Unparsable values fall back
//! to their defaults with a warning instead of aborting start-up.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Settings shared by the API client, the list views and the timers
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the rental backend, without trailing slash
    pub api_base_url: String,

    /// Port this front-end listens on
    pub port: u16,

    /// Page size of the customer table
    pub customer_page_size: u32,

    /// Page size of the three rental views
    pub rental_page_size: u32,

    /// How many customers the rental form's selector asks for
    pub customer_select_size: u32,

    /// Lifetime of a notification before it removes itself
    pub notification_ttl: Duration,

    /// Quiet period before a search-as-you-type request is sent
    pub search_debounce: Duration,

    /// Upper bound for a single backend request
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: 3000,
            customer_page_size: 10,
            rental_page_size: 12,
            customer_select_size: 1000,
            notification_ttl: Duration::from_millis(5000),
            search_debounce: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Reads the configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `API_BASE_URL` - Rental backend (default: `http://localhost:8080`)
    /// - `PORT` - Listening port (default: 3000)
    /// - `CUSTOMER_PAGE_SIZE` - Customers per page (default: 10)
    /// - `RENTAL_PAGE_SIZE` - Rentals per page (default: 12)
    /// - `CUSTOMER_SELECT_SIZE` - Customers loaded into the selector (default: 1000)
    /// - `NOTIFICATION_TTL_MS` - Notification lifetime (default: 5000)
    /// - `SEARCH_DEBOUNCE_MS` - Search debounce delay (default: 500)
    /// - `REQUEST_TIMEOUT_SECS` - Backend request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            port: read_var("PORT", defaults.port),
            customer_page_size: read_size("CUSTOMER_PAGE_SIZE", defaults.customer_page_size),
            rental_page_size: read_size("RENTAL_PAGE_SIZE", defaults.rental_page_size),
            customer_select_size: read_size("CUSTOMER_SELECT_SIZE", defaults.customer_select_size),
            notification_ttl: Duration::from_millis(read_var(
                "NOTIFICATION_TTL_MS",
                defaults.notification_ttl.as_millis() as u64,
            )),
            search_debounce: Duration::from_millis(read_var(
                "SEARCH_DEBOUNCE_MS",
                defaults.search_debounce.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(read_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        }
    }

    /// Default configuration pointed at another backend
    pub fn with_api_base_url(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ..Config::default()
        }
    }
}

/// Like [`read_var`], but a page size of 0 also falls back to the default
fn read_size(name: &str, default: u32) -> u32 {
    match read_var(name, default) {
        0 => {
            tracing::warn!("{} must be at least 1, using {}", name, default);
            default
        }
        size => size,
    }
}

fn read_var<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("invalid value {:?} for {}, using {}", raw, name, default);
            default
        }),
        Err(_) => default,
    }
}
