use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::digest::gemini::{DEFAULT_GENERATIVE_API_BASE, DEFAULT_MODEL};
use crate::digest::prompt::PromptStyle;
use crate::mail::fetcher::PAGE_SIZE;
use crate::mail::gmail::DEFAULT_GMAIL_API_BASE;

pub const APP_DIR: &str = "inbox_digest";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub listen_addr: Option<String>,
    pub server_url: Option<String>,
    pub gmail_api_base: Option<String>,
    pub generative_api_base: Option<String>,
    pub model: Option<String>,
    pub page_size: Option<usize>,
    pub prompt_style: Option<PromptStyle>,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        self.listen_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
    }

    pub fn server_url(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn gmail_api_base(&self) -> String {
        self.gmail_api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_GMAIL_API_BASE.to_string())
    }

    pub fn generative_api_base(&self) -> String {
        self.generative_api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_GENERATIVE_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(PAGE_SIZE).clamp(1, PAGE_SIZE)
    }

    pub fn prompt_style(&self) -> PromptStyle {
        self.prompt_style.unwrap_or_default()
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

fn template() -> Config {
    Config {
        listen_addr: Some(DEFAULT_LISTEN_ADDR.to_string()),
        server_url: Some(DEFAULT_SERVER_URL.to_string()),
        gmail_api_base: Some(DEFAULT_GMAIL_API_BASE.to_string()),
        generative_api_base: Some(DEFAULT_GENERATIVE_API_BASE.to_string()),
        model: Some(DEFAULT_MODEL.to_string()),
        page_size: Some(PAGE_SIZE),
        prompt_style: Some(PromptStyle::Prioritized),
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Read the config at `path`. A missing file is replaced by a template and
/// reported as an error so the user can review it first.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let tom = toml::to_string_pretty(&template())?;
        fs::write(path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {} — edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("inbox_digest_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join(name);
        let _ = fs::remove_file(&p);
        p
    }

    #[test]
    fn missing_file_writes_a_loadable_template() {
        let path = scratch_path("missing.toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Created template config"));

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.listen_addr(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cfg.prompt_style(), PromptStyle::Prioritized);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let path = scratch_path("partial.toml");
        fs::write(&path, "model = \"gemini-1.5-pro\"\nprompt_style = \"plain\"\npage_size = 40\n")
            .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.model(), "gemini-1.5-pro");
        assert_eq!(cfg.prompt_style(), PromptStyle::Plain);
        assert_eq!(cfg.page_size(), PAGE_SIZE);
        assert_eq!(cfg.gmail_api_base(), DEFAULT_GMAIL_API_BASE);
        assert_eq!(cfg.server_url(), DEFAULT_SERVER_URL);
    }
}
