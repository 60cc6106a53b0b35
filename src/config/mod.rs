pub mod messages;
pub mod settings;

use settings::Settings;
use std::path::Path;

/// 入力ファイルのパスからsettings.yamlを自動検出して読み込む。
///
/// 入力ファイルと同じディレクトリに `settings.yaml` が存在すれば読み込み、
/// 存在しなければデフォルト設定を返す。
pub fn load_settings_for_input(input_path: &Path) -> crate::error::Result<Settings> {
    let dir = input_path
        .parent()
        .ok_or_else(|| crate::error::ScanError::config("Cannot determine input file directory"))?;

    let settings_path = dir.join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
