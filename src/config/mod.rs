use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_DIALOG_TEMPLATE: &str = "/static/html/id2/project.new.html";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialogConfig {
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            fields: default_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `name=value` pairs seeded into the cookie jar (session, csrftoken)
    #[serde(default)]
    pub cookies: Vec<String>,

    #[serde(default)]
    pub log_file: Option<String>,

    #[serde(default)]
    pub dialog: DialogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookies: Vec::new(),
            log_file: None,
            dialog: DialogConfig::default(),
        }
    }
}

impl Config {
    /// Cookie pairs that look like `name=value`, trimmed
    pub fn cookie_pairs(&self) -> Vec<(String, String)> {
        self.cookies
            .iter()
            .filter_map(|raw| {
                let (name, value) = raw.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    /// Dialog field names with blanks removed
    pub fn dialog_fields(&self) -> Vec<String> {
        let fields: Vec<String> = self
            .dialog
            .fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            default_fields()
        } else {
            fields
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_template() -> String {
    DEFAULT_DIALOG_TEMPLATE.to_string()
}

fn default_fields() -> Vec<String> {
    vec!["name".to_string(), "description".to_string()]
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_from(&path)
}

pub fn load_from(path: &std::path::Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ID2_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("id2-projects").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("id2-projects").join("config.toml"));
    }

    directories::ProjectDirs::from("org", "id2", "id2-projects")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("id2-projects"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("id2-projects"));
    }
    directories::ProjectDirs::from("org", "id2", "id2-projects")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("id2-projects.log"))
}

pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.dialog.template, "/static/html/id2/project.new.html");
        assert_eq!(config.dialog_fields(), vec!["name", "description"]);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            base_url = "https://id2.example.org"
            cookies = ["sessionid=abc", "csrftoken = tok ", "garbage", "=x"]
            log_file = "/tmp/id2.log"

            [dialog]
            fields = ["title", " ", "summary"]
            "#,
        );
        assert_eq!(config.base_url, "https://id2.example.org");
        assert_eq!(
            config.cookie_pairs(),
            vec![
                ("sessionid".to_string(), "abc".to_string()),
                ("csrftoken".to_string(), "tok".to_string()),
            ]
        );
        assert_eq!(config.log_file.as_deref(), Some("/tmp/id2.log"));
        assert_eq!(config.dialog_fields(), vec!["title", "summary"]);
        assert_eq!(config.dialog.template, DEFAULT_DIALOG_TEMPLATE);
    }

    #[test]
    fn test_invalid_toml_falls_back() {
        assert_eq!(parse("base_url = ["), Config::default());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url(" https://x.org "), "https://x.org");
    }
}
