use std::path::Path;

use serde::Deserialize;

use super::messages::Locale;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// PDFページのビューポート倍率（1.0 = 1pt/px）。
    pub pdf_scale: f32,
    pub try_harder: bool,
    /// 空なら全フォーマットを対象にする。
    pub possible_formats: Vec<String>,
    pub parallel_workers: usize,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pdf_scale: 3.0,
            try_harder: true,
            possible_formats: Vec::new(),
            parallel_workers: 0,
            locale: Locale::En,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// 値の範囲を検証する。
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.pdf_scale.is_finite() || self.pdf_scale <= 0.0 {
            return Err(crate::error::ScanError::config(format!(
                "pdf_scale must be a positive number, got {}",
                self.pdf_scale
            )));
        }
        Ok(())
    }
}
