//! Error types for record store construction

/// RecordStore 構築時の契約違反
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 画像番号は 1 始まり
    #[error("record #{position}: image index must be >= 1 (case {case})")]
    ImageOutOfRange { position: usize, case: u32 },
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;
