use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::is_valid_email;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub branding: BrandingConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub wkhtmltopdf_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct BrandingConfig {
    pub company_name: String,
    pub currency_prefix: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub quote_validity_days: u32,
    pub tagline: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig { data_dir: PathBuf::from(".") },
            export: ExportConfig { output_dir: PathBuf::from("."), wkhtmltopdf_path: None },
            branding: BrandingConfig {
                company_name: "MotoQuote Zambia".to_string(),
                currency_prefix: "K".to_string(),
                contact_phone: "+260 211 123 456".to_string(),
                contact_email: "info@motoquote.zm".to_string(),
                quote_validity_days: 30,
                tagline: "Making motor insurance accessible and transparent.".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("motoquote.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(data_dir) = storage.data_dir {
                self.storage.data_dir = data_dir;
            }
        }

        if let Some(export) = patch.export {
            if let Some(output_dir) = export.output_dir {
                self.export.output_dir = output_dir;
            }
            if let Some(wkhtmltopdf_path) = export.wkhtmltopdf_path {
                self.export.wkhtmltopdf_path = Some(wkhtmltopdf_path);
            }
        }

        if let Some(branding) = patch.branding {
            if let Some(company_name) = branding.company_name {
                self.branding.company_name = company_name;
            }
            if let Some(currency_prefix) = branding.currency_prefix {
                self.branding.currency_prefix = currency_prefix;
            }
            if let Some(contact_phone) = branding.contact_phone {
                self.branding.contact_phone = contact_phone;
            }
            if let Some(contact_email) = branding.contact_email {
                self.branding.contact_email = contact_email;
            }
            if let Some(quote_validity_days) = branding.quote_validity_days {
                self.branding.quote_validity_days = quote_validity_days;
            }
            if let Some(tagline) = branding.tagline {
                self.branding.tagline = tagline;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MOTOQUOTE_STORAGE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(value);
        }

        if let Some(value) = read_env("MOTOQUOTE_EXPORT_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("MOTOQUOTE_EXPORT_WKHTMLTOPDF_PATH") {
            self.export.wkhtmltopdf_path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("MOTOQUOTE_BRANDING_COMPANY_NAME") {
            self.branding.company_name = value;
        }
        if let Some(value) = read_env("MOTOQUOTE_BRANDING_CURRENCY_PREFIX") {
            self.branding.currency_prefix = value;
        }
        if let Some(value) = read_env("MOTOQUOTE_BRANDING_CONTACT_PHONE") {
            self.branding.contact_phone = value;
        }
        if let Some(value) = read_env("MOTOQUOTE_BRANDING_CONTACT_EMAIL") {
            self.branding.contact_email = value;
        }
        if let Some(value) = read_env("MOTOQUOTE_BRANDING_QUOTE_VALIDITY_DAYS") {
            self.branding.quote_validity_days =
                parse_u32("MOTOQUOTE_BRANDING_QUOTE_VALIDITY_DAYS", &value)?;
        }
        if let Some(value) = read_env("MOTOQUOTE_BRANDING_TAGLINE") {
            self.branding.tagline = value;
        }

        let log_level =
            read_env("MOTOQUOTE_LOGGING_LEVEL").or_else(|| read_env("MOTOQUOTE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("MOTOQUOTE_LOGGING_FORMAT").or_else(|| read_env("MOTOQUOTE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.storage.data_dir = data_dir;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.export.output_dir = output_dir;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage(&self.storage)?;
        validate_export(&self.export)?;
        validate_branding(&self.branding)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("motoquote.toml"), PathBuf::from("config/motoquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("storage.data_dir must not be empty".to_string()));
    }

    Ok(())
}

fn validate_export(export: &ExportConfig) -> Result<(), ConfigError> {
    if export.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("export.output_dir must not be empty".to_string()));
    }

    Ok(())
}

fn validate_branding(branding: &BrandingConfig) -> Result<(), ConfigError> {
    if branding.company_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "branding.company_name must not be empty".to_string(),
        ));
    }

    if branding.currency_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "branding.currency_prefix must not be empty".to_string(),
        ));
    }

    if !is_valid_email(&branding.contact_email) {
        return Err(ConfigError::Validation(
            "branding.contact_email must be a valid email address".to_string(),
        ));
    }

    if branding.quote_validity_days == 0 || branding.quote_validity_days > 365 {
        return Err(ConfigError::Validation(
            "branding.quote_validity_days must be in range 1..=365".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    export: Option<ExportPatch>,
    branding: Option<BrandingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ExportPatch {
    output_dir: Option<PathBuf>,
    wkhtmltopdf_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct BrandingPatch {
    company_name: Option<String>,
    currency_prefix: Option<String>,
    contact_phone: Option<String>,
    contact_email: Option<String>,
    quote_validity_days: Option<u32>,
    tagline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
