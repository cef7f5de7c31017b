//! 識別子の採番

use rand::Rng;
use uuid::Uuid;

use super::value_object::{FamilyId, ROOM_CODE_LENGTH, ReminderId, RoomCode, UserId};

const ROOM_CODE_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ルームコードの採番
///
/// 英大文字 26 文字から 8 文字を一様に選びます。
/// 衝突チェックは呼び出し側（CreateRoom）が Repository に対して行います。
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    pub fn generate() -> RoomCode {
        Self::generate_with(&mut rand::rng())
    }

    /// 乱数生成器を指定して採番（テスト用）
    pub fn generate_with<R: Rng>(rng: &mut R) -> RoomCode {
        let code: String = (0..ROOM_CODE_LENGTH)
            .map(|_| char::from(ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())]))
            .collect();
        RoomCode(code)
    }
}

/// 家族 ID の採番（UUID の先頭 8 桁の 16 進数）
pub struct FamilyIdFactory;

impl FamilyIdFactory {
    pub fn generate() -> FamilyId {
        let hex = Uuid::new_v4().simple().to_string();
        FamilyId(hex[..8].to_string())
    }
}

/// ユーザー ID の採番（"USID" + 16 進数 4 桁の大文字）
pub struct UserIdFactory;

impl UserIdFactory {
    pub fn generate() -> UserId {
        let hex = Uuid::new_v4().simple().to_string();
        UserId(format!("USID{}", hex[..4].to_uppercase()))
    }
}

/// リマインダー ID の採番（UUID の先頭 8 桁の 16 進数を大文字で）
pub struct ReminderIdFactory;

impl ReminderIdFactory {
    pub fn generate() -> ReminderId {
        let hex = Uuid::new_v4().simple().to_string();
        ReminderId(hex[..8].to_uppercase())
    }
}
