//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::RoomCode;

/// Value Object の生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    /// 必須の値が空
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// ルームコードの形式が不正
    #[error("Invalid room code '{0}': expected 8 uppercase letters")]
    InvalidRoomCode(String),

    /// 未知のロール
    #[error("Unknown role '{0}'")]
    InvalidRole(String),

    /// 緯度・経度が範囲外、または有限の値でない
    #[error("Invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// データストアに到達できない、または操作が失敗した
    #[error("Data store unavailable: {0}")]
    Unavailable(String),

    /// 家族はすでにルームを持っている
    #[error("Family already owns room {0}")]
    FamilyRoomExists(RoomCode),

    /// ルームコードがすでに使用されている
    #[error("Room code {0} is already in use")]
    CodeTaken(RoomCode),

    /// 更新対象のドキュメントが存在しない
    #[error("Document not found: {0}")]
    NotFound(String),
}
