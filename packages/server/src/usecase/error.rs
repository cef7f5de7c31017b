//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// UseCase のエラー
///
/// UI 層はこのエラーを HTTP ステータス付きの JSON エンベロープ、
/// または WebSocket のエラーフレームに変換します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    /// 必須項目の欠落・形式不正
    #[error("{0}")]
    Validation(String),

    /// ルーム・ユーザー・家族が存在しない
    #[error("{0}")]
    NotFound(String),

    /// 家族が一致しない、または入室許可がない
    #[error("{0}")]
    Unauthorized(String),

    /// データストアに到達できない、または操作が失敗した
    #[error("Database error occurred: {0}")]
    Persistence(#[from] RepositoryError),

    /// セッションのない接続からの送信など、状態に合わない操作
    #[error("{0}")]
    InvalidState(String),
}

impl From<ValueObjectError> for UseCaseError {
    fn from(e: ValueObjectError) -> Self {
        UseCaseError::Validation(e.to_string())
    }
}
