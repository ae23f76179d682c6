//! レポート設定
//!
//! 設定ファイル（TOML / JSON）と CLI 引数をマージする。CLI 指定が優先。

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// レポートの節
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// 検出器ごとのキーポイント数・サイズ
    Keypoints,
    /// ケースごとのマッチ数
    Matches,
    /// ケースごとの検出・記述子時間
    Durations,
    /// 検出器×記述子の時間マトリクス
    Matrix,
    /// ケース番号順の表
    Table,
    /// 時間順の表
    SortedTable,
}

/// 出力順
pub const CANONICAL_ORDER: [Section; 6] = [
    Section::Keypoints,
    Section::Matches,
    Section::Durations,
    Section::Matrix,
    Section::Table,
    Section::SortedTable,
];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfigFile {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub json: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// 出力する節（`CANONICAL_ORDER` 順、重複なし）
    pub sections: Vec<Section>,
    /// テキストの代わりに JSON を出力する
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: CANONICAL_ORDER.to_vec(),
            json: false,
        }
    }
}

pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ReportConfigFile> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase());
    let parsed = match ext.as_deref() {
        Some("json") => serde_json::from_str(&data).map_err(anyhow::Error::from),
        Some("toml") => toml::from_str(&data).map_err(anyhow::Error::from),
        _ => toml::from_str(&data)
            .map_err(anyhow::Error::from)
            .or_else(|_| serde_json::from_str(&data).map_err(anyhow::Error::from)),
    };
    parsed.with_context(|| format!("failed to parse config {}", path.display()))
}

fn normalize_sections(v: Vec<Section>) -> Vec<Section> {
    let set: HashSet<_> = v.into_iter().collect();
    CANONICAL_ORDER.iter().copied().filter(|s| set.contains(s)).collect()
}

/// 設定ファイルと CLI 引数をマージする
///
/// 節の指定は CLI（空でなければ）→ 設定ファイル → 全節 の順で採用する。
/// `--json` は CLI で立てるか、設定ファイルで `json = true` のとき有効。
pub fn merge_config(
    file: Option<ReportConfigFile>,
    cli_sections: Vec<Section>,
    cli_json: bool,
) -> ReportConfig {
    let file = file.unwrap_or_default();
    let sections = if !cli_sections.is_empty() {
        normalize_sections(cli_sections)
    } else if !file.sections.is_empty() {
        normalize_sections(file.sections)
    } else {
        CANONICAL_ORDER.to_vec()
    };
    ReportConfig {
        sections,
        json: cli_json || file.json.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_all_sections() {
        let merged = merge_config(None, Vec::new(), false);
        assert_eq!(merged, ReportConfig::default());
    }

    #[test]
    fn test_sections_are_normalized() {
        let merged = merge_config(
            None,
            vec![Section::SortedTable, Section::Keypoints, Section::SortedTable],
            false,
        );
        assert_eq!(merged.sections, vec![Section::Keypoints, Section::SortedTable]);
    }

    #[test]
    fn test_toml_section_names_are_kebab_case() {
        let file: ReportConfigFile =
            toml::from_str("sections = [\"sorted-table\", \"matrix\"]").unwrap();
        assert_eq!(file.sections, vec![Section::SortedTable, Section::Matrix]);
        assert_eq!(file.json, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(toml::from_str::<ReportConfigFile>("colour = true").is_err());
    }

    #[test]
    fn test_load_json_config_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, r#"{"sections": ["table", "keypoints"], "json": true}"#).unwrap();

        let file = load_config_file(&path).unwrap();
        assert_eq!(file.sections, vec![Section::Table, Section::Keypoints]);
        assert_eq!(file.json, Some(true));

        let merged = merge_config(Some(file), Vec::new(), false);
        assert_eq!(merged.sections, vec![Section::Keypoints, Section::Table]);
        assert!(merged.json);
    }

    #[test]
    fn test_unknown_extension_tries_toml_then_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("report.conf");
        std::fs::write(&toml_path, "json = true\n").unwrap();
        assert_eq!(load_config_file(&toml_path).unwrap().json, Some(true));

        let json_path = dir.path().join("report.cfg");
        std::fs::write(&json_path, r#"{"sections": ["matrix"]}"#).unwrap();
        assert_eq!(load_config_file(&json_path).unwrap().sections, vec![Section::Matrix]);

        let bad_path = dir.path().join("report.txt");
        std::fs::write(&bad_path, "sections = [").unwrap();
        let err = load_config_file(&bad_path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"), "{err:#}");
    }
}
