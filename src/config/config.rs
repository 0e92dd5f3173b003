use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::identity::IdentityConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;
use super::store::StoreConfig;

/// Environment variable naming the YAML file to load.
pub const CONFIG_PATH_ENV: &str = "COPYPASTA_CONFIG";
/// Prefix for environment overrides, e.g. `COPYPASTA_IDENTITY__CLIENT_SECRET`.
pub const ENV_PREFIX: &str = "COPYPASTA_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    /// Shown on the sign-in page.
    pub application_name: String,
    #[serde(default = "default_template_path")]
    pub template_path: String,
    pub logging: LoggingConfig,
    pub identity: IdentityConfig,
    pub session: SessionConfig,
    pub store: StoreConfig,
}

fn default_template_path() -> String {
    "template/index.html".to_string()
}

/// Builds the figment used by `load_config`: the YAML file first, then
/// `COPYPASTA_*` environment overrides on top.
pub fn config_figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]))
}

/// Extracts and unwraps the versioned config from a prepared figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from the YAML file named by `COPYPASTA_CONFIG` (default "./config.yaml").
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    match extract_config(&config_figment(&path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration from '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error serializing configuration schema: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
version: "1.0.0"
bind_address: "127.0.0.1:8080"
application_name: "Copy Pasta"
logging:
  level: info
  format: console
identity:
  client_id: web-client
  client_secret: web-secret
  expected_audience: ios-client
session:
  secret: cookie-secret
store:
  type: memory
"#;

    fn parse(yaml: &str) -> Result<ConfigV1, figment::Error> {
        extract_config(&Figment::new().merge(Yaml::string(yaml)))
    }

    #[test]
    fn test_defaults_are_filled_in() {
        let cfg = parse(MINIMAL).expect("minimal config should parse");
        assert_eq!(cfg.template_path, "template/index.html");
        assert_eq!(cfg.session.cookie_name, "sessionName");
        assert_eq!(cfg.session.max_age_secs, 2_592_000);
        assert!(!cfg.session.secure);
        assert_eq!(cfg.identity.redirect_uri, "postmessage");
        assert_eq!(
            cfg.identity.token_url,
            "https://accounts.google.com/o/oauth2/token"
        );
        assert_eq!(cfg.logging.service_name, "copypasta");
        assert!(matches!(cfg.store, StoreConfig::Memory));
    }

    #[test]
    fn test_mongo_store_is_parsed() {
        let yaml = MINIMAL.replace(
            "  type: memory",
            "  type: mongo\n  uri: mongodb://localhost:27017\n  database: pasta",
        );
        let cfg = parse(&yaml).expect("mongo config should parse");
        match cfg.store {
            StoreConfig::MongoDB(m) => {
                assert_eq!(m.database, "pasta");
                assert_eq!(m.collection, "copies");
            }
            other => panic!("expected mongo store, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let yaml = MINIMAL.replace("1.0.0", "9.9.9");
        assert!(parse(&yaml).is_err());
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let yaml = MINIMAL.replace("  expected_audience: ios-client\n", "");
        assert!(parse(&yaml).is_err());
    }

    #[test]
    fn test_schema_lists_only_used_identity_endpoints() {
        let schema = serde_json::to_value(schema_for!(Config)).unwrap();
        let text = schema.to_string();
        assert!(text.contains("tokeninfo_url"));
        assert!(!text.contains("auth_url"));
    }
}
