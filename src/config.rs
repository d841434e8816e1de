use crate::defines::*;
use crate::errors::{Error, Result};
use crate::rest::GeminiClient;
use crate::types::{Context, Credentials};

use serde::Deserialize;

/// Layout of the yml configuration file
#[derive(Debug, Default, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub gemini_api_credentials: ConfigCredentials,
}

/// Every field may be left out or empty, the environment fills the gaps.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigCredentials {
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub gemini_api_secret: Option<String>,

    #[serde(default)]
    pub gemini_api_production: Option<ProductionFlag>,
}

/// `gemini_api_production` written either quoted or as a bare yml boolean.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductionFlag {
    Flag(bool),
    Text(String),
}

impl ProductionFlag {
    fn into_text(self) -> String {
        match self {
            ProductionFlag::Flag(b) => b.to_string(),
            ProductionFlag::Text(s) => s,
        }
    }
}

/// Read and parse the configuration file at `path`.
pub fn load_config(path: &str) -> Result<GeminiConfig> {
    log::debug!("Loading configuration file {}", path);
    let content = std::fs::read_to_string(path).map_err(|source| {
        log::debug!("Open configuration file error path:{} error:{}", path, source);
        Error::ConfigOpen { path: path.to_string(), source }
    })?;

    serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_string(),
        source,
    })
}

/// Resolve credentials from the configuration file at `config_path` (if any)
/// and the process environment. Non-empty configuration values win.
pub fn resolve(config_path: Option<&str>, ctx: &Context) -> Result<Credentials> {
    resolve_with(config_path, ctx, |name| std::env::var(name).ok())
}

/// `resolve` with the environment lookup supplied by the caller.
pub fn resolve_with<F>(config_path: Option<&str>, ctx: &Context, env: F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match config_path {
        Some(path) => load_config(path)?.gemini_api_credentials,
        None => ConfigCredentials::default(),
    };

    let api_key = pick(file.gemini_api_key, ENV_API_KEY, &env);
    let api_secret = pick(file.gemini_api_secret, ENV_API_SECRET, &env);

    // a malformed value from the configuration file does not fall back to the environment
    let production = pick(
        file.gemini_api_production.map(ProductionFlag::into_text),
        ENV_API_PRODUCTION,
        &env,
    )
    .and_then(|raw| parse_production(&raw));

    let mut missing = Vec::new();
    if api_key.is_none() {
        missing.push(ENV_API_KEY);
    }
    if api_secret.is_none() {
        missing.push(ENV_API_SECRET);
    }
    if production.is_none() {
        missing.push(ENV_API_PRODUCTION);
    }

    match (api_key, api_secret, production) {
        (Some(api_key), Some(api_secret), Some(production)) => {
            // discloses key and secret, only ever at trace
            if ctx.verbosity.discloses_secrets() {
                log::trace!(
                    "Gemini gemini_api_key:{} gemini_api_secret:{} gemini_api_production:{}",
                    api_key,
                    api_secret,
                    production
                );
            }
            Ok(Credentials { api_key, api_secret, production })
        }
        _ => Err(Error::MissingCredentials { missing }),
    }
}

/// Resolve credentials and build the REST client against production or sandbox.
pub fn start_api(config_path: Option<&str>, ctx: &Context) -> Result<GeminiClient> {
    let credentials = resolve(config_path, ctx)?;
    let client = GeminiClient::new(&credentials);
    if credentials.production {
        log::debug!("Connecting to Gemini Production site {}", client.base_url());
    } else {
        log::debug!("Connecting to Gemini Sandbox site {}", client.base_url());
    }
    Ok(client)
}

fn pick<F>(from_config: Option<String>, var: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = from_config.filter(|v| !v.is_empty()) {
        log::debug!("{} taken from configuration file", var);
        return Some(value);
    }
    match env(var).filter(|v| !v.is_empty()) {
        Some(value) => {
            log::debug!("{} taken from environment", var);
            Some(value)
        }
        None => {
            log::warn!("Missing {}", var);
            None
        }
    }
}

/// Accepts the usual spellings of a boolean: 1, t, T, TRUE, true, True and
/// their false counterparts. Anything else is left unresolved.
fn parse_production(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => {
            log::warn!("{} must be set as true or false, got {:?}", ENV_API_PRODUCTION, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verbosity;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Once;
    use tempfile::NamedTempFile;

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    /// Keeps every record logged on the current thread, whatever its level.
    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT_LOGGER: Once = Once::new();

    fn captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        INIT_LOGGER.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Trace);
        });
        CAPTURED.with(|c| c.borrow_mut().clear());
        let out = f();
        let logs = CAPTURED.with(|c| c.borrow_mut().drain(..).collect());
        (out, logs)
    }

    fn ctx() -> Context {
        Context::default()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("GEMINI_API_KEY", "env-key"),
        ("GEMINI_API_SECRET", "env-secret"),
        ("GEMINI_API_PRODUCTION", "false"),
    ];

    #[test]
    fn environment_only() {
        let creds = resolve_with(None, &ctx(), env(FULL_ENV)).unwrap();
        assert_eq!(creds.api_key, "env-key");
        assert_eq!(creds.api_secret, "env-secret");
        assert!(!creds.production);
    }

    #[test]
    fn config_wins_over_environment() {
        let file = config_file(
            "gemini_api_credentials:\n  gemini_api_key: \"cfg-key\"\n  gemini_api_secret: \"cfg-secret\"\n  gemini_api_production: \"true\"\n",
        );
        let path = file.path().to_str().unwrap();
        let creds = resolve_with(Some(path), &ctx(), env(FULL_ENV)).unwrap();
        assert_eq!(creds.api_key, "cfg-key");
        assert_eq!(creds.api_secret, "cfg-secret");
        assert!(creds.production);
    }

    #[test]
    fn precedence_is_per_field() {
        let file = config_file("gemini_api_credentials:\n  gemini_api_key: \"cfg-key\"\n  gemini_api_secret: \"\"\n");
        let path = file.path().to_str().unwrap();
        let creds = resolve_with(Some(path), &ctx(), env(FULL_ENV)).unwrap();
        assert_eq!(creds.api_key, "cfg-key");
        assert_eq!(creds.api_secret, "env-secret");
        assert!(!creds.production);
    }

    #[test]
    fn bare_yml_boolean_is_accepted() {
        let file = config_file(
            "gemini_api_credentials:\n  gemini_api_key: k\n  gemini_api_secret: s\n  gemini_api_production: true\n",
        );
        let path = file.path().to_str().unwrap();
        let creds = resolve_with(Some(path), &ctx(), env(&[])).unwrap();
        assert!(creds.production);
    }

    #[test]
    fn missing_fields_are_named() {
        let err = resolve_with(None, &ctx(), env(&[("GEMINI_API_SECRET", "s")])).unwrap_err();
        match &err {
            Error::MissingCredentials { missing } => {
                assert_eq!(missing, &vec!["GEMINI_API_KEY", "GEMINI_API_PRODUCTION"]);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Set Gemini API credentials, missing: GEMINI_API_KEY, GEMINI_API_PRODUCTION"
        );
    }

    #[test]
    fn malformed_production_counts_as_missing() {
        let vars = [
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_SECRET", "s"),
            ("GEMINI_API_PRODUCTION", "yes"),
        ];
        let err = resolve_with(None, &ctx(), env(&vars)).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { ref missing } if missing == &vec!["GEMINI_API_PRODUCTION"]));
    }

    #[test]
    fn malformed_config_production_does_not_fall_back() {
        let file = config_file("gemini_api_credentials:\n  gemini_api_production: \"maybe\"\n");
        let path = file.path().to_str().unwrap();
        let err = resolve_with(Some(path), &ctx(), env(FULL_ENV)).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { ref missing } if missing == &vec!["GEMINI_API_PRODUCTION"]));
    }

    #[test]
    fn empty_environment_values_are_missing() {
        let vars = [
            ("GEMINI_API_KEY", ""),
            ("GEMINI_API_SECRET", ""),
            ("GEMINI_API_PRODUCTION", ""),
        ];
        let err = resolve_with(None, &ctx(), env(&vars)).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { ref missing } if missing.len() == 3));
    }

    #[test]
    fn unreadable_config_names_the_path() {
        let err = resolve_with(Some("/nonexistent/gemini.yml"), &ctx(), env(FULL_ENV)).unwrap_err();
        assert!(matches!(err, Error::ConfigOpen { .. }));
        assert_eq!(err.to_string(), "Cannot open configuration file: /nonexistent/gemini.yml");
    }

    #[test]
    fn unparsable_config_is_fatal() {
        let file = config_file("gemini_api_credentials: [not, a, map\n");
        let path = file.path().to_str().unwrap();
        let err = resolve_with(Some(path), &ctx(), env(FULL_ENV)).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains(path));
    }

    #[test]
    fn config_without_credentials_section_falls_back() {
        let file = config_file("something_else: 1\n");
        let path = file.path().to_str().unwrap();
        let creds = resolve_with(Some(path), &ctx(), env(FULL_ENV)).unwrap();
        assert_eq!(creds.api_key, "env-key");
    }

    #[test]
    fn production_flag_spellings() {
        for (raw, expected) in [
            ("1", true),
            ("t", true),
            ("T", true),
            ("TRUE", true),
            ("True", true),
            ("true", true),
            ("0", false),
            ("f", false),
            ("F", false),
            ("FALSE", false),
            ("False", false),
            ("false", false),
        ] {
            let vars = [
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_API_SECRET", "s"),
                ("GEMINI_API_PRODUCTION", raw),
            ];
            let creds = resolve_with(None, &ctx(), env(&vars)).unwrap();
            assert_eq!(creds.production, expected, "for {:?}", raw);
        }

        for raw in ["yes", "no", "tRUE", "2", " true"] {
            let vars = [
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_API_SECRET", "s"),
                ("GEMINI_API_PRODUCTION", raw),
            ];
            let err = resolve_with(None, &ctx(), env(&vars)).unwrap_err();
            assert!(
                matches!(err, Error::MissingCredentials { ref missing } if missing == &vec!["GEMINI_API_PRODUCTION"]),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn secrets_stay_out_of_debug_logs() {
        let vars = [
            ("GEMINI_API_KEY", "key-4f1c"),
            ("GEMINI_API_SECRET", "secret-9b2e"),
            ("GEMINI_API_PRODUCTION", "false"),
        ];
        for verbosity in [Verbosity::Normal, Verbosity::Debug] {
            let ctx = Context { verbosity };
            let (creds, logs) = captured_logs(|| resolve_with(None, &ctx, env(&vars)));
            assert!(creds.is_ok());
            assert!(!logs.is_empty(), "resolver logged nothing at {:?}", verbosity);
            for line in &logs {
                assert!(!line.contains("key-4f1c"), "key leaked at {:?}: {}", verbosity, line);
                assert!(!line.contains("secret-9b2e"), "secret leaked at {:?}: {}", verbosity, line);
            }
        }
    }

    #[test]
    fn trace_discloses_secrets() {
        let vars = [
            ("GEMINI_API_KEY", "key-7d3a"),
            ("GEMINI_API_SECRET", "secret-0c5f"),
            ("GEMINI_API_PRODUCTION", "true"),
        ];
        let ctx = Context { verbosity: Verbosity::Trace };
        let (creds, logs) = captured_logs(|| resolve_with(None, &ctx, env(&vars)));
        assert!(creds.is_ok());
        assert!(logs.iter().any(|line| line.contains("key-7d3a") && line.contains("secret-0c5f")));
    }
}
