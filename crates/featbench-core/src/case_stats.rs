//! テストケースごとの処理時間・マッチ数統計
//!
//! 処理時間とマッチ数はケース内の画像について単純平均を取る（キーポイント数では
//! 重み付けしない）。最小・最大マッチ数は平均ではなく生の値から求める。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::RecordStore;

/// 1ケース分の集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStat {
    pub case: u32,
    pub detector: String,
    pub descriptor: String,
    pub matcher: String,
    pub selector: String,
    /// ケースに含まれるレコード（画像）数
    pub images: usize,
    /// 検出時間の平均（ミリ秒）
    pub mean_detector_duration: f64,
    /// 記述子計算時間の平均（ミリ秒）
    pub mean_descriptor_duration: f64,
    /// `mean_detector_duration + mean_descriptor_duration`
    pub total_duration: f64,
    pub mean_matches: f64,
    pub min_matches: u64,
    pub max_matches: u64,
}

impl CaseStat {
    /// マッチ数のエラーバー `(mean - min, max - mean)`
    pub fn matches_error_bars(&self) -> (f64, f64) {
        (
            self.mean_matches - self.min_matches as f64,
            self.max_matches as f64 - self.mean_matches,
        )
    }

    /// 検出時間 vs 記述子時間の散布図上の点
    pub fn duration_point(&self) -> (f64, f64) {
        (self.mean_detector_duration, self.mean_descriptor_duration)
    }

    /// 表の行ラベル
    pub fn label(&self) -> String {
        format!("Case {}", self.case)
    }
}

/// ケース番号 → [`CaseStat`]（ケース番号の昇順で走査）
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CaseStats {
    stats: BTreeMap<u32, CaseStat>,
}

impl CaseStats {
    pub fn aggregate(store: &RecordStore) -> Self {
        // 1. ケースごとの画像数。ラベルは最初の行のものを採用する。
        let mut stats: BTreeMap<u32, CaseStat> = BTreeMap::new();
        for record in store {
            stats
                .entry(record.case)
                .or_insert_with(|| CaseStat {
                    case: record.case,
                    detector: record.detector.clone(),
                    descriptor: record.descriptor.clone(),
                    matcher: record.matcher.clone(),
                    selector: record.selector.clone(),
                    images: 0,
                    mean_detector_duration: 0.0,
                    mean_descriptor_duration: 0.0,
                    total_duration: 0.0,
                    mean_matches: 0.0,
                    min_matches: record.matches,
                    max_matches: record.matches,
                })
                .images += 1;
        }

        // 2. 平均と min/max
        for record in store {
            let Some(stat) = stats.get_mut(&record.case) else {
                continue;
            };
            let n = stat.images as f64;
            stat.mean_detector_duration += record.detector_duration / n;
            stat.mean_descriptor_duration += record.descriptor_duration / n;
            stat.mean_matches += record.matches as f64 / n;
            stat.min_matches = stat.min_matches.min(record.matches);
            stat.max_matches = stat.max_matches.max(record.matches);
        }

        // 3. 合計時間
        for stat in stats.values_mut() {
            stat.total_duration = stat.mean_detector_duration + stat.mean_descriptor_duration;
        }
        log::debug!("aggregated {} cases", stats.len());

        Self { stats }
    }

    pub fn get(&self, case: u32) -> Option<&CaseStat> {
        self.stats.get(&case)
    }

    /// ケース番号の昇順に走査する
    pub fn iter(&self) -> impl Iterator<Item = &CaseStat> {
        self.stats.values()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// 全ケースの合計時間の `(min, max)`。ケースがなければ `None`。
    pub fn duration_bounds(&self) -> Option<(f64, f64)> {
        self.stats.values().map(|s| s.total_duration).fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::{record, with_timing};

    fn aggregate(records: Vec<crate::Record>) -> CaseStats {
        CaseStats::aggregate(&RecordStore::new(records).unwrap())
    }

    #[test]
    fn test_single_image_case_keeps_raw_values() {
        let stats = aggregate(vec![with_timing(record(7, 1, "FAST", "ORB"), 1.25, 0.75, 143)]);
        let c = stats.get(7).unwrap();
        assert_eq!(c.images, 1);
        assert_eq!(c.mean_detector_duration, 1.25);
        assert_eq!(c.mean_descriptor_duration, 0.75);
        assert_eq!(c.mean_matches, 143.0);
        assert_eq!(c.min_matches, 143);
        assert_eq!(c.max_matches, 143);
        assert!((c.total_duration - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_means_are_unweighted_over_images() {
        let stats = aggregate(vec![
            with_timing(record(1, 1, "SIFT", "SIFT"), 100.0, 60.0, 80),
            with_timing(record(1, 2, "SIFT", "SIFT"), 120.0, 40.0, 100),
            with_timing(record(1, 3, "SIFT", "SIFT"), 80.0, 50.0, 120),
            with_timing(record(1, 4, "SIFT", "SIFT"), 100.0, 50.0, 90),
        ]);
        let c = stats.get(1).unwrap();
        assert_eq!(c.images, 4);
        assert!((c.mean_detector_duration - 100.0).abs() < 1e-9);
        assert!((c.mean_descriptor_duration - 50.0).abs() < 1e-9);
        assert!((c.total_duration - 150.0).abs() < 1e-9);
        assert!((c.mean_matches - 97.5).abs() < 1e-9);
        assert_eq!(c.min_matches, 80);
        assert_eq!(c.max_matches, 120);
        let (lo, hi) = c.matches_error_bars();
        assert!((lo - 17.5).abs() < 1e-9);
        assert!((hi - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_cases_iterate_in_ascending_id() {
        let stats = aggregate(vec![
            record(3, 1, "ORB", "ORB"),
            record(1, 1, "FAST", "BRIEF"),
            record(2, 1, "AKAZE", "AKAZE"),
        ]);
        let ids: Vec<u32> = stats.iter().map(|c| c.case).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(stats.get(2).unwrap().label(), "Case 2");
    }

    #[test]
    fn test_end_to_end_totals() {
        let stats = aggregate(vec![
            with_timing(record(1, 1, "detA", "descX"), 10.0, 5.0, 20),
            with_timing(record(2, 1, "detB", "descY"), 2.0, 1.0, 5),
        ]);
        assert_eq!(stats.get(1).unwrap().total_duration, 15.0);
        assert_eq!(stats.get(2).unwrap().total_duration, 3.0);
        assert_eq!(stats.duration_bounds(), Some((3.0, 15.0)));
        assert_eq!(stats.get(2).unwrap().duration_point(), (2.0, 1.0));
    }

    #[test]
    fn test_empty_store_has_no_bounds() {
        let stats = aggregate(Vec::new());
        assert!(stats.is_empty());
        assert_eq!(stats.duration_bounds(), None);
    }
}
