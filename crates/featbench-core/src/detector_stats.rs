//! 検出器ごとのキーポイント統計
//!
//! キーポイント数で重み付けした平均サイズと、画像内分散＋画像間平均のばらつきを
//! 合成したプール標準偏差を求める。合成には検出器ごとの総キーポイント数と
//! 加重平均が確定している必要があるため、集計は
//! 「合計 → 平均 → 分散」の3パスを必ずこの順で回す。

use std::collections::HashMap;

use serde::Serialize;

use crate::record::RecordStore;

/// 1検出器分の集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorStat {
    pub detector: String,
    /// 全レコードのキーポイント数の合計
    pub total_keypoints: u64,
    /// 画像ごとのキーポイント数（`image - 1` で索引、長さは画像数）
    ///
    /// 同じ (検出器, 画像) が複数行ある場合は最後の行の値が残る。
    pub per_image_keypoints: Vec<u64>,
    /// キーポイント数で重み付けしたサイズ平均（キーポイント0個なら 0）
    pub mean_size: f64,
    /// プール標準偏差（キーポイント0個なら 0）
    pub stddev_size: f64,
}

/// 画像ごとのキーポイント数のばらつき（棒グラフのエラーバー用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountSpread {
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

impl CountSpread {
    /// `(mean - min, max - mean)`
    pub fn error_bars(&self) -> (f64, f64) {
        (self.mean - self.min as f64, self.max as f64 - self.mean)
    }
}

impl DetectorStat {
    /// 画像ごとのキーポイント数の平均・最小・最大
    ///
    /// 検出器が出現しなかった画像も 0 として平均に含める。
    pub fn count_spread(&self) -> CountSpread {
        let n = self.per_image_keypoints.len();
        if n == 0 {
            return CountSpread {
                mean: 0.0,
                min: 0,
                max: 0,
            };
        }
        let sum: u64 = self.per_image_keypoints.iter().sum();
        CountSpread {
            mean: sum as f64 / n as f64,
            min: self.per_image_keypoints.iter().copied().min().unwrap_or(0),
            max: self.per_image_keypoints.iter().copied().max().unwrap_or(0),
        }
    }
}

/// 検出器ラベル → [`DetectorStat`]（初出順を保持）
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DetectorStats {
    stats: Vec<DetectorStat>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// 集計中の作業領域
struct Accumulator {
    total: u64,
    per_image: Vec<u64>,
    mean: f64,
    variance: f64,
}

impl Accumulator {
    fn new(num_images: usize) -> Self {
        Self {
            total: 0,
            per_image: vec![0; num_images],
            mean: 0.0,
            variance: 0.0,
        }
    }

    /// `keypoints / total`。総数 0 の検出器は寄与なし。
    fn weight(&self, keypoints: u64) -> Option<f64> {
        (self.total > 0).then(|| keypoints as f64 / self.total as f64)
    }
}

impl DetectorStats {
    pub fn aggregate(store: &RecordStore) -> Self {
        let num_images = store.num_images() as usize;

        // グループキーの確定（初出順）と各レコードの所属先
        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut slots = Vec::with_capacity(store.len());
        for record in store {
            let slot = match index.get(&record.detector) {
                Some(&slot) => slot,
                None => {
                    let slot = labels.len();
                    labels.push(record.detector.clone());
                    index.insert(record.detector.clone(), slot);
                    slot
                }
            };
            slots.push(slot);
        }
        let mut accs: Vec<Accumulator> =
            (0..labels.len()).map(|_| Accumulator::new(num_images)).collect();

        // 1. 合計
        for (record, &slot) in store.iter().zip(&slots) {
            let acc = &mut accs[slot];
            acc.total += record.keypoints;
            // RecordStore が image >= 1 と image <= num_images を保証している
            acc.per_image[(record.image - 1) as usize] = record.keypoints;
        }

        // 2. 加重平均
        for (record, &slot) in store.iter().zip(&slots) {
            let acc = &mut accs[slot];
            if let Some(w) = acc.weight(record.keypoints) {
                acc.mean += record.keypoint_size_mean * w;
            }
        }

        // 3. プール分散
        for (record, &slot) in store.iter().zip(&slots) {
            let acc = &mut accs[slot];
            if let Some(w) = acc.weight(record.keypoints) {
                let between = record.keypoint_size_mean - acc.mean;
                acc.variance += (record.keypoint_size_stddev.powi(2) + between.powi(2)) * w;
            }
        }

        let stats: Vec<DetectorStat> = labels
            .into_iter()
            .zip(accs)
            .map(|(detector, acc)| {
                if acc.total == 0 {
                    log::warn!("detector {detector} reported no keypoints; size stats are 0");
                }
                DetectorStat {
                    detector,
                    total_keypoints: acc.total,
                    per_image_keypoints: acc.per_image,
                    mean_size: acc.mean,
                    stddev_size: acc.variance.max(0.0).sqrt(),
                }
            })
            .collect();
        log::debug!("aggregated {} detectors over {num_images} images", stats.len());

        Self { stats, index }
    }

    pub fn get(&self, detector: &str) -> Option<&DetectorStat> {
        self.index.get(detector).map(|&i| &self.stats[i])
    }

    /// 初出順に走査する
    pub fn iter(&self) -> std::slice::Iter<'_, DetectorStat> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
