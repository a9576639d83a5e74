//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AnonymizeFilterConfig;
use crate::domain::errors::AnonymizeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AnonymizeFilterConfig
/// 4. Applies environment variable overrides (ANONYMIZE_* prefix)
/// 5. Validates the configuration, including algorithm resolution
///
/// # Errors
///
/// Returns a configuration error if:
/// - File cannot be read
/// - A referenced environment variable is not set
/// - TOML parsing fails (including missing `fields` or `key`)
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use anonymize::config::loader::load_config;
///
/// let config = load_config("anonymize.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonymizeFilterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonymizeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonymizeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<AnonymizeFilterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AnonymizeFilterConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| match e {
        AnonymizeError::Configuration(msg) => {
            AnonymizeError::Configuration(format!("Configuration validation failed: {msg}"))
        }
        other => other,
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap_or_else(|e| panic!("invalid pattern: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone. Every missing variable is reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AnonymizeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ANONYMIZE_* prefix
fn apply_env_overrides(config: &mut AnonymizeFilterConfig) {
    if let Ok(val) = std::env::var("ANONYMIZE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ANONYMIZE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ANONYMIZE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    config.anonymize.apply_env_overrides();
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ANONYMIZE_LOADER_TEST_VAR", "test_value");
        let input = "key = \"${ANONYMIZE_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "key = \"test_value\"\n");
        std::env::remove_var("ANONYMIZE_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ANONYMIZE_LOADER_MISSING_A");
        std::env::remove_var("ANONYMIZE_LOADER_MISSING_B");
        let input = "a = \"${ANONYMIZE_LOADER_MISSING_A}\"\nb = \"${ANONYMIZE_LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("ANONYMIZE_LOADER_MISSING_A"));
        assert!(err.contains("ANONYMIZE_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("ANONYMIZE_LOADER_COMMENTED");
        let input = "# key = \"${ANONYMIZE_LOADER_COMMENTED}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-anonymize.toml");
        assert!(matches!(result, Err(AnonymizeError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymize]
fields = ["clientip", "[user][email]"]
key = "loader-test-key"
algorithm = "SHA512"

[anonymize.condition]
tags = ["web"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymize.fields.len(), 2);
        assert_eq!(config.anonymize.algorithm, "SHA512");
        assert_eq!(config.anonymize.condition.tags, vec!["web".to_string()]);
        assert_eq!(
            config.anonymize.key.expose_secret().as_ref(),
            "loader-test-key"
        );
    }

    #[test]
    fn test_parse_config_unknown_algorithm() {
        let err = parse_config(
            r#"
[anonymize]
fields = ["ip"]
key = "k"
algorithm = "ROT13"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
        assert!(err.to_string().contains("ROT13"));
    }

    #[test]
    fn test_parse_config_missing_section() {
        let err = parse_config("[application]\nlog_level = \"info\"\n").unwrap_err();
        assert!(matches!(err, AnonymizeError::Configuration(_)));
    }
}
