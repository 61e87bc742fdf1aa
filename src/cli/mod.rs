use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "favlist-api")]
#[command(about = "Favlist API - per-user favorite lists over HTTP")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Port to listen on (overrides FAVLIST_API_PORT and PORT)")]
    pub port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub bind: String,

    #[arg(long, help = "Use the in-memory store even when DATABASE_URL is set")]
    pub memory: bool,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.api.port = port;
        }
    }

    pub fn bind_addr(&self, config: &AppConfig) -> String {
        format!("{}:{}", self.bind, config.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_flag_overrides_config() {
        let cli = Cli::parse_from(["favlist-api", "--port", "4100", "--bind", "127.0.0.1"]);
        let mut config = AppConfig::development();
        cli.apply(&mut config);

        assert_eq!(config.api.port, 4100);
        assert_eq!(cli.bind_addr(&config), "127.0.0.1:4100");
        assert!(!cli.memory);
    }

    #[test]
    fn defaults_keep_config_port() {
        let cli = Cli::parse_from(["favlist-api", "--memory"]);
        let mut config = AppConfig::development();
        let before = config.api.port;
        cli.apply(&mut config);

        assert_eq!(config.api.port, before);
        assert!(cli.memory);
    }
}
