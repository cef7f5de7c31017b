//! Value Objects
//!
//! 生成時にバリデーションを行い、不正な値を持つインスタンスが存在しないことを保証します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// ルームコードの長さ
pub const ROOM_CODE_LENGTH: usize = 8;

fn non_empty(value: String, field: &'static str) -> Result<String, ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    Ok(value)
}

macro_rules! string_value_object {
    ($name:ident) => {
        impl $name {
            /// 文字列への参照を取得
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 内部の文字列を取り出す
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

/// ルームコード（英大文字 8 文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(pub(super) String);

impl RoomCode {
    /// ルームコードを作成（英大文字 A-Z のみ、8 文字固定）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.len() != ROOM_CODE_LENGTH || !value.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValueObjectError::InvalidRoomCode(value));
        }
        Ok(Self(value))
    }
}

string_value_object!(RoomCode);

/// 家族グループの ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyId(pub(super) String);

impl FamilyId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "familyId").map(Self)
    }
}

string_value_object!(FamilyId);

/// ユーザー（介護者または患者）の永続的な ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub(super) String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "userId").map(Self)
    }
}

string_value_object!(UserId);

/// 送信時点の表示名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "name").map(Self)
    }
}

string_value_object!(DisplayName);

/// メッセージ本文（空白のみは不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "message").map(Self)
    }
}

string_value_object!(MessageBody);

/// トランスポート層の接続 ID（接続ごとに一意、接続中のみ有効）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "connectionId").map(Self)
    }

    /// 新しい接続 ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

string_value_object!(ConnectionId);

/// JoinRoom が発行し、Connect が提示する短命の認可トークン
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinToken(String);

impl JoinToken {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "token").map(Self)
    }

    /// 推測困難なトークンを新規発行
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

string_value_object!(JoinToken);

/// ユーザーのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 介護者（"CG"）
    Caregiver,
    /// 患者（"PAT"）
    Patient,
}

impl Role {
    /// ワイヤ上の表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Caregiver => "CG",
            Role::Patient => "PAT",
        }
    }

    /// 文字列からロールを解釈
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        match value {
            "CG" => Ok(Role::Caregiver),
            "PAT" => Ok(Role::Patient),
            other => Err(ValueObjectError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// リマインダーの ID（UUID 由来の 16 進数 8 桁の大文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderId(pub(super) String);

impl ReminderId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "remId").map(Self)
    }
}

string_value_object!(ReminderId);

/// 端末のプッシュ通知トークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushToken(String);

impl PushToken {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty(value, "token").map(Self)
    }
}

string_value_object!(PushToken);

/// 緯度・経度（度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// 緯度 -90〜90、経度 -180〜180 の範囲で作成
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValueObjectError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValueObjectError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `millis` ミリ秒後のタイムスタンプ
    pub fn add_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}
