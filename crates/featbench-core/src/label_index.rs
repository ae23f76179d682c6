//! マトリクス配置用のラベル索引

use std::collections::HashMap;

use serde::Serialize;

use crate::case_stats::CaseStats;

/// 検出器・記述子ラベルの索引
///
/// ケース番号の昇順に走査し、初めて現れたラベルに次の番号を割り当てる。
/// 一度割り当てた番号は変わらない。
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelIndex {
    detectors: Vec<String>,
    descriptors: Vec<String>,
    #[serde(skip)]
    detector_index: HashMap<String, usize>,
    #[serde(skip)]
    descriptor_index: HashMap<String, usize>,
}

fn assign(labels: &mut Vec<String>, index: &mut HashMap<String, usize>, label: &str) {
    if !index.contains_key(label) {
        index.insert(label.to_string(), labels.len());
        labels.push(label.to_string());
    }
}

impl LabelIndex {
    pub fn assign(cases: &CaseStats) -> Self {
        let mut this = Self::default();
        for case in cases.iter() {
            assign(&mut this.detectors, &mut this.detector_index, &case.detector);
            assign(&mut this.descriptors, &mut this.descriptor_index, &case.descriptor);
        }
        this
    }

    pub fn detector(&self, label: &str) -> Option<usize> {
        self.detector_index.get(label).copied()
    }

    pub fn descriptor(&self, label: &str) -> Option<usize> {
        self.descriptor_index.get(label).copied()
    }

    /// 横軸ラベル（索引順）
    pub fn detectors(&self) -> &[String] {
        &self.detectors
    }

    /// 縦軸ラベル（索引順）
    pub fn descriptors(&self) -> &[String] {
        &self.descriptors
    }
}
