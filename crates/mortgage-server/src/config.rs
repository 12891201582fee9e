use clap::Parser;
use mortgage_core::amortization::{TermPolicy, DEFAULT_TERM_YEARS};
use std::net::SocketAddr;

/// Server settings, from flags or `MORTGAGE_*` environment variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "mortgage-server", version, about = "Mortgage payment quote server")]
pub struct Settings {
    /// Address to listen on
    #[arg(long, env = "MORTGAGE_SERVER_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    /// Token the front end must echo in X-CSRFToken; unset disables the check
    #[arg(long, env = "MORTGAGE_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Reject a missing term on /api/mortgage instead of defaulting it
    #[arg(long, env = "MORTGAGE_STRICT_TERM")]
    pub strict_term: bool,

    /// Term substituted for a missing one when not strict
    #[arg(long, env = "MORTGAGE_DEFAULT_TERM_YEARS", default_value_t = DEFAULT_TERM_YEARS)]
    pub default_term_years: u32,

    /// Allowed CORS origins (comma-separated); empty allows none cross-origin
    #[arg(long, env = "MORTGAGE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log level for the server's own events
    #[arg(long, env = "MORTGAGE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "MORTGAGE_LOG_JSON")]
    pub log_json: bool,
}

impl Settings {
    pub fn term_policy(&self) -> TermPolicy {
        if self.strict_term {
            TermPolicy::Reject
        } else {
            TermPolicy::Default(self.default_term_years)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            csrf_token: None,
            strict_term: false,
            default_term_years: DEFAULT_TERM_YEARS,
            cors_origins: Vec::new(),
            log_level: "info".into(),
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let settings = Settings::parse_from([
            "mortgage-server",
            "--addr",
            "0.0.0.0:9000",
            "--csrf-token",
            "abc",
            "--cors-origins",
            "https://a.example,https://b.example",
            "--default-term-years",
            "15",
        ]);
        assert_eq!(settings.addr.port(), 9000);
        assert_eq!(settings.csrf_token.as_deref(), Some("abc"));
        assert_eq!(settings.cors_origins.len(), 2);
        assert_eq!(settings.term_policy(), TermPolicy::Default(15));
    }

    #[test]
    fn test_strict_term_policy() {
        let settings = Settings {
            strict_term: true,
            ..Settings::default()
        };
        assert_eq!(settings.term_policy(), TermPolicy::Reject);
    }
}
