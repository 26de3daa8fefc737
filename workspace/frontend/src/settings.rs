use log::Level;
use model::{RefetchPolicy, PAGE_SIZE_OPTIONS};
use wasm_bindgen::JsValue;
use web_sys::window;

const KEY_PREFIX: &str = "catalog_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Catalog backend, protocol included (e.g. "http://127.0.0.1:8000")
    pub api_base_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// When rows and year counts are refetched
    pub refetch_policy: RefetchPolicy,

    /// Initial rows per page of the content table
    pub page_size: usize,

    /// Fetch and show the server-rendered chart
    pub fetch_chart_image: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            log_level: Level::Info,
            debug_mode: false,
            refetch_policy: RefetchPolicy::OnSubmit,
            page_size: PAGE_SIZE_OPTIONS[0],
            fetch_chart_image: false,
        }
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_overrides(|key| storage.get_item(&storage_key(key)).ok().flatten());
            }
        }

        settings
    }

    /// Applies stored values; unparsable ones keep the current setting.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get("api_base_url") {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }

        if let Some(log_level) = get("log_level") {
            self.log_level = match log_level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }

        if let Some(policy) = get("refetch_policy") {
            match policy.parse::<RefetchPolicy>() {
                Ok(policy) => self.refetch_policy = policy,
                Err(e) => log::warn!("Ignoring stored refetch policy: {}", e),
            }
        }

        if let Some(page_size) = get("page_size") {
            if let Ok(size) = page_size.parse::<usize>() {
                if size > 0 {
                    self.page_size = size;
                }
            }
        }

        if let Some(flag) = get("fetch_chart_image") {
            self.fetch_chart_image = flag.to_lowercase() == "true";
        }
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(&storage_key("api_base_url"), &self.api_base_url)?;
                storage.set_item(&storage_key("log_level"), &format!("{:?}", self.log_level).to_lowercase())?;
                storage.set_item(&storage_key("refetch_policy"), &self.refetch_policy.to_string())?;
                storage.set_item(&storage_key("page_size"), &self.page_size.to_string())?;
                storage.set_item(&storage_key("fetch_chart_image"), &self.fetch_chart_image.to_string())?;
            }
        }
        Ok(())
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name)
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
