//! ケースごとの集計表

use serde::Serialize;

use crate::case_stats::CaseStats;

/// 表の列見出し
pub const TABLE_COLUMNS: [&str; 4] = ["Detector", "Descriptor", "Duration (ms)", "Matches"];

/// 表の1行（表示用に整形済み）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub detector: String,
    pub descriptor: String,
    /// 合計時間（小数1桁）
    pub duration: String,
    /// 平均マッチ数（整数に丸め）
    pub matches: String,
}

impl TableRow {
    pub fn cells(&self) -> [&str; 4] {
        [&self.detector, &self.descriptor, &self.duration, &self.matches]
    }
}

/// 行ラベル（`"Case N"`）と行データを対にした表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseTable {
    pub labels: Vec<String>,
    pub rows: Vec<TableRow>,
    /// 各行のケース番号
    pub cases: Vec<u32>,
    #[serde(skip)]
    durations: Vec<f64>,
}

impl CaseTable {
    /// ケース番号順の表
    pub fn build(cases: &CaseStats) -> Self {
        let mut table = Self::default();
        for case in cases.iter() {
            table.labels.push(case.label());
            table.cases.push(case.case);
            table.durations.push(case.total_duration);
            table.rows.push(TableRow {
                detector: case.detector.clone(),
                descriptor: case.descriptor.clone(),
                duration: format!("{:.1}", case.total_duration),
                matches: format!("{:.0}", case.mean_matches),
            });
        }
        table
    }

    /// 合計時間の昇順に並べ替えた表
    ///
    /// 行とラベルを同じ順列で並べ替える。安定ソートなので、同じ時間のケースは
    /// 元の（ケース番号の）順序を保つ。
    pub fn sorted_by_duration(&self) -> Self {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| self.durations[a].total_cmp(&self.durations[b]));
        Self {
            labels: order.iter().map(|&i| self.labels[i].clone()).collect(),
            rows: order.iter().map(|&i| self.rows[i].clone()).collect(),
            cases: order.iter().map(|&i| self.cases[i]).collect(),
            durations: order.iter().map(|&i| self.durations[i]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(ラベル, 行)` の組で走査する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableRow)> {
        self.labels.iter().map(String::as_str).zip(&self.rows)
    }
}
