//! `.site-i18n.json` の読み込みと検証

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".site-i18n.json";

/// サイトのルートにある設定ファイルのパス
#[must_use]
pub fn config_path(site_root: &Path) -> PathBuf {
    site_root.join(CONFIG_FILE_NAME)
}

/// サイトの設定を読み込んで検証する
///
/// 設定ファイルが無い場合はデフォルト設定を返す。
/// ファイル内で省略されたフィールドはデフォルト値で補完される。
///
/// # Arguments
/// * `site_root` - サイトのルートパス
///
/// # Errors
/// - 設定ファイルの読み込みエラー（パス付き）
/// - JSON パースエラー（パス付き）
/// - バリデーションエラー（`i18n.keySeparator` のようなフィールドパス付き）
pub fn load_site_settings(site_root: &Path) -> Result<SiteSettings, ConfigError> {
    let path = config_path(site_root);

    let settings = match std::fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "Loading site configuration");
            serde_json::from_str(&content)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No site configuration, using defaults");
            SiteSettings::default()
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Site settings: {:?}", settings);

    Ok(settings)
}
