use crate::utils::error::{Result, RibbitError};
use crate::utils::validation::{invalid_value, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub pow: PowSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub json_logs: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8062,
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// 每頁結果數
    pub per_page: usize,
    /// 查詢中最多處理的字數
    pub word_max: usize,
    /// 片語最長字數
    pub phrase_max: usize,
    /// 搜尋快取秒數，0 代表停用
    pub cache_ttl_secs: u64,
    /// 片語別名，例如 "lily pad" = ["lily", "pad"]
    pub aliases: HashMap<String, Vec<String>>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            per_page: 20,
            word_max: 20,
            phrase_max: 3,
            cache_ttl_secs: 600,
            aliases: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowSettings {
    pub required: bool,
    pub difficulty: u8,
    pub valid_secs: u32,
    /// How long a spent challenge is remembered. Must cover `valid_secs`.
    pub replay_window_secs: u64,
}

impl Default for PowSettings {
    fn default() -> Self {
        Self {
            required: true,
            difficulty: 18,
            valid_secs: 900,
            replay_window_secs: 900,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON snapshot of all posts; in-memory only when unset.
    pub snapshot_path: Option<String>,
}

impl Settings {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RibbitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RibbitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RIBBIT_PORT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RibbitError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(invalid_value("server.host", &self.host, "Host cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for SearchSettings {
    fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(invalid_value(
                "search.per_page",
                self.per_page,
                "A page holds at least one post",
            ));
        }
        if self.word_max == 0 {
            return Err(invalid_value(
                "search.word_max",
                self.word_max,
                "Queries need at least one word",
            ));
        }
        validate_range("search.phrase_max", self.phrase_max, 1, 8)?;

        for (phrase, tags) in &self.aliases {
            if phrase.trim().is_empty() {
                return Err(invalid_value(
                    "search.aliases",
                    phrase,
                    "Alias phrase cannot be empty",
                ));
            }
            if tags.iter().all(|tag| tag.trim().is_empty()) {
                return Err(invalid_value(
                    "search.aliases",
                    phrase,
                    "Alias must point at least at one tag",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for PowSettings {
    fn validate(&self) -> Result<()> {
        // spow 只接受 10 以上的難度
        validate_range("pow.difficulty", self.difficulty, 10, 32)?;
        if self.valid_secs == 0 {
            return Err(invalid_value(
                "pow.valid_secs",
                self.valid_secs,
                "Challenges must stay valid for a while",
            ));
        }
        if self.required && self.replay_window_secs < u64::from(self.valid_secs) {
            return Err(invalid_value(
                "pow.replay_window_secs",
                self.replay_window_secs,
                format!(
                    "Spent challenges must be remembered as long as they stay valid ({}s)",
                    self.valid_secs
                ),
            ));
        }
        Ok(())
    }
}

impl Validate for StorageSettings {
    fn validate(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if path.trim().is_empty() || path.contains('\0') {
            return Err(invalid_value(
                "storage.snapshot_path",
                path,
                "Not a usable file path",
            ));
        }
        if Path::new(path).is_dir() {
            return Err(invalid_value(
                "storage.snapshot_path",
                path,
                "Points at a directory, expected a file",
            ));
        }
        Ok(())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.search.validate()?;
        self.pow.validate()?;
        self.storage.validate()
    }
}
