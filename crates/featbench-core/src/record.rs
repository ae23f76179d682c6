//! ベンチマークログの1行と、その不変なシーケンス

use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// ベンチマークログの1行（1ケース×1画像の観測）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// テストケース番号
    ///
    /// グループ化のキーとしてだけ使う。ランナーは 0 から振ることがある。
    pub case: u32,
    /// 画像番号（1 始まり）
    pub image: u32,
    pub detector: String,
    pub descriptor: String,
    pub matcher: String,
    pub selector: String,
    /// 検出時間（ミリ秒）
    pub detector_duration: f64,
    /// 記述子計算時間（ミリ秒）
    pub descriptor_duration: f64,
    /// マッチング時間（ミリ秒）
    pub matching_duration: f64,
    /// 検出されたキーポイント数
    pub keypoints: u64,
    /// キーポイントサイズの平均
    /// キーポイントが 0 個の画像ではランナーが -1 を書く
    pub keypoint_size_mean: f64,
    /// キーポイントサイズの標準偏差
    pub keypoint_size_stddev: f64,
    /// マッチ数
    pub matches: u64,
}

/// 集計の入力となるレコード列
///
/// 構築後は変更できない。別のログを集計する場合は新しく作り直す。
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    num_images: u32,
}

impl RecordStore {
    /// レコード列から構築する
    ///
    /// `image` が 0 のレコードは契約違反としてその場でエラーにする。
    pub fn new(records: Vec<Record>) -> StoreResult<Self> {
        let mut num_images = 0;
        for (position, record) in records.iter().enumerate() {
            if record.image == 0 {
                return Err(StoreError::ImageOutOfRange {
                    position,
                    case: record.case,
                });
            }
            num_images = num_images.max(record.image);
        }
        Ok(Self {
            records,
            num_images,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 全レコード中の最大画像番号
    pub fn num_images(&self) -> u32 {
        self.num_images
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Record;

    /// テスト用のレコード。キーポイント関連は後から上書きする。
    pub(crate) fn record(case: u32, image: u32, detector: &str, descriptor: &str) -> Record {
        Record {
            case,
            image,
            detector: detector.to_string(),
            descriptor: descriptor.to_string(),
            matcher: "MAT_BF".to_string(),
            selector: "SEL_KNN".to_string(),
            detector_duration: 1.0,
            descriptor_duration: 1.0,
            matching_duration: 0.5,
            keypoints: 10,
            keypoint_size_mean: 1.0,
            keypoint_size_stddev: 0.0,
            matches: 5,
        }
    }

    pub(crate) fn with_keypoints(
        mut record: Record,
        keypoints: u64,
        mean: f64,
        stddev: f64,
    ) -> Record {
        record.keypoints = keypoints;
        record.keypoint_size_mean = mean;
        record.keypoint_size_stddev = stddev;
        record
    }

    pub(crate) fn with_timing(
        mut record: Record,
        detector_duration: f64,
        descriptor_duration: f64,
        matches: u64,
    ) -> Record {
        record.detector_duration = detector_duration;
        record.descriptor_duration = descriptor_duration;
        record.matches = matches;
        record
    }
}
