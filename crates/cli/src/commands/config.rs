use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use motoquote_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run(config: &AppConfig, options: &LoadOptions) -> String {
    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: flags > env > file > default):".to_string()];

    lines.push(render_line(
        "storage.data_dir",
        &config.storage.data_dir.display().to_string(),
        field_source(
            "storage.data_dir",
            options.overrides.data_dir.is_some().then_some("--data-dir"),
            &["MOTOQUOTE_STORAGE_DATA_DIR"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "export.output_dir",
        &config.export.output_dir.display().to_string(),
        field_source(
            "export.output_dir",
            options.overrides.output_dir.is_some().then_some("--output-dir"),
            &["MOTOQUOTE_EXPORT_OUTPUT_DIR"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    let wkhtmltopdf = config
        .export
        .wkhtmltopdf_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "export.wkhtmltopdf_path",
        &wkhtmltopdf,
        field_source(
            "export.wkhtmltopdf_path",
            None,
            &["MOTOQUOTE_EXPORT_WKHTMLTOPDF_PATH"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "branding.company_name",
        &config.branding.company_name,
        field_source(
            "branding.company_name",
            None,
            &["MOTOQUOTE_BRANDING_COMPANY_NAME"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "branding.currency_prefix",
        &config.branding.currency_prefix,
        field_source(
            "branding.currency_prefix",
            None,
            &["MOTOQUOTE_BRANDING_CURRENCY_PREFIX"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "branding.contact_phone",
        &config.branding.contact_phone,
        field_source(
            "branding.contact_phone",
            None,
            &["MOTOQUOTE_BRANDING_CONTACT_PHONE"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "branding.contact_email",
        &config.branding.contact_email,
        field_source(
            "branding.contact_email",
            None,
            &["MOTOQUOTE_BRANDING_CONTACT_EMAIL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "branding.quote_validity_days",
        &config.branding.quote_validity_days.to_string(),
        field_source(
            "branding.quote_validity_days",
            None,
            &["MOTOQUOTE_BRANDING_QUOTE_VALIDITY_DAYS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "branding.tagline",
        &config.branding.tagline,
        field_source(
            "branding.tagline",
            None,
            &["MOTOQUOTE_BRANDING_TAGLINE"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            options.overrides.log_level.is_some().then_some("--log-level"),
            &["MOTOQUOTE_LOGGING_LEVEL", "MOTOQUOTE_LOG_LEVEL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            None,
            &["MOTOQUOTE_LOGGING_FORMAT", "MOTOQUOTE_LOG_FORMAT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("motoquote.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/motoquote.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    flag: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = flag {
        return format!("flag ({flag})");
    }

    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
