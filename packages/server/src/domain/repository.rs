//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドはドキュメントストアへの 1 往復に相当し、
//! 単一ドキュメントに対する操作はアトミックであることを前提とします。
//! 複数ドキュメントにまたがるトランザクションは要求しません。

use async_trait::async_trait;

use super::{
    ChatMessage, Coordinates, Family, FamilyId, JoinTicket, JoinToken, MemoryProfile, PushToken,
    Reminder, ReminderChanges, ReminderId, RepositoryError, Room, RoomCode, SavedLocations,
    Timestamp, User, UserId,
};

/// `RoomRepository::release_member` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRelease {
    /// 減算後も参加者が残っている（減算後の人数）
    Remaining(i64),
    /// 減算後の人数が 0 以下になったためルームを削除した
    Deleted,
    /// ルームが存在しなかった
    NotFound,
}

/// Room Directory
///
/// ルームコード → {家族, 接続中の参加者数} の永続的な対応表。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを登録
    ///
    /// 家族がすでにルームを持っていれば `FamilyRoomExists`、
    /// コードが使用中であれば `CodeTaken` を返す（どちらも同一ロック内で判定）。
    async fn create(&self, room: Room) -> Result<(), RepositoryError>;

    /// コードでルームを取得
    async fn find_by_code(&self, code: &RoomCode) -> Result<Option<Room>, RepositoryError>;

    /// 家族 ID でルームを取得
    async fn find_by_family(&self, family_id: &FamilyId) -> Result<Option<Room>, RepositoryError>;

    /// 参加者数をアトミックに +1 し、加算後の人数を返す
    ///
    /// 並行する削除と競合してルームが消えていた場合は `family_id` で再作成する（upsert）。
    /// その家族がすでに別のルームを持っていれば再作成せず `FamilyRoomExists` を返す。
    async fn increment_members(
        &self,
        code: &RoomCode,
        family_id: &FamilyId,
    ) -> Result<i64, RepositoryError>;

    /// 参加者数をアトミックに -1 し、0 以下になった場合は同じ操作内でルームを削除
    async fn release_member(&self, code: &RoomCode) -> Result<MemberRelease, RepositoryError>;

    /// ルームを削除
    async fn delete(&self, code: &RoomCode) -> Result<(), RepositoryError>;
}

/// Message Log
///
/// ルームごとの追記専用メッセージ列。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLogRepository: Send + Sync {
    /// メッセージを追記（ログが存在しなければ作成）
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError>;

    /// ルームのメッセージを追記順に取得（ログがなければ空）
    async fn list(&self, code: &RoomCode) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// ルームのログを削除
    async fn delete(&self, code: &RoomCode) -> Result<(), RepositoryError>;
}

/// Join Ticket Store
///
/// JoinRoom が発行した入室許可を、Connect が一度だけ消費するためのストア。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JoinTicketRepository: Send + Sync {
    /// チケットを保存
    async fn issue(&self, ticket: JoinTicket) -> Result<(), RepositoryError>;

    /// チケットを取り出す（取り出したチケットは削除される）
    ///
    /// 存在しない、または `now` の時点で失効している場合は `None`。
    async fn consume(
        &self,
        token: &JoinToken,
        now: Timestamp,
    ) -> Result<Option<JoinTicket>, RepositoryError>;

    /// 失効したチケットを削除し、削除した件数を返す
    async fn purge_expired(&self, now: Timestamp) -> Result<usize, RepositoryError>;
}

/// User / Family Directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// ユーザーを取得
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// ユーザーを登録
    async fn insert_user(&self, user: User) -> Result<(), RepositoryError>;

    /// 家族を取得
    async fn find_family(&self, family_id: &FamilyId) -> Result<Option<Family>, RepositoryError>;

    /// 指定したユーザーをメンバーに含む家族を取得
    async fn find_family_of_member(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Family>, RepositoryError>;

    /// 家族を登録
    async fn insert_family(&self, family: Family) -> Result<(), RepositoryError>;

    /// ユーザーの所属家族を設定
    async fn assign_user_family(
        &self,
        user_id: &UserId,
        family_id: &FamilyId,
    ) -> Result<(), RepositoryError>;

    /// 家族のメンバーにユーザーを追加（すでに含まれていれば何もしない）
    async fn add_family_member(
        &self,
        family_id: &FamilyId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;

    /// 家族の患者を設定
    async fn set_family_patient(
        &self,
        family_id: &FamilyId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;
}

/// `ReminderRepository::update` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderUpdate {
    /// 1 つ以上の項目が変わった
    Updated,
    /// リマインダーはあるが、値は変わらなかった
    Unchanged,
    /// リマインダーが存在しなかった
    NotFound,
}

/// Reminder Store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// リマインダーを登録
    async fn insert(&self, reminder: Reminder) -> Result<(), RepositoryError>;

    /// ユーザーのリマインダーを登録順に取得
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reminder>, RepositoryError>;

    /// ID でリマインダーを取得
    async fn find(&self, id: &ReminderId) -> Result<Option<Reminder>, RepositoryError>;

    /// 部分更新をアトミックに適用
    async fn update(
        &self,
        id: &ReminderId,
        changes: ReminderChanges,
    ) -> Result<ReminderUpdate, RepositoryError>;

    /// リマインダーを削除し、削除した場合は `true` を返す
    async fn delete(&self, id: &ReminderId) -> Result<bool, RepositoryError>;
}

/// Location Store
///
/// ユーザーごとに自宅と現在地を 1 件ずつ保持する。保存はどちらも upsert。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// 自宅（安全な場所）を保存
    async fn save_home(
        &self,
        user_id: &UserId,
        coordinates: Coordinates,
    ) -> Result<(), RepositoryError>;

    /// 現在地を保存
    async fn save_current(
        &self,
        user_id: &UserId,
        coordinates: Coordinates,
    ) -> Result<(), RepositoryError>;

    /// ユーザーの保存済み位置情報を取得
    async fn find(&self, user_id: &UserId) -> Result<Option<SavedLocations>, RepositoryError>;
}

/// Memory Profile Store（ユーザーごとに 1 件）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemoryProfileRepository: Send + Sync {
    /// 追加情報を保存し、新規作成だった場合は `true` を返す
    async fn upsert(&self, profile: MemoryProfile) -> Result<bool, RepositoryError>;

    /// ユーザーの追加情報を取得（なければ空）
    async fn list(&self, user_id: &UserId) -> Result<Vec<MemoryProfile>, RepositoryError>;
}

/// Push Token Store（ユーザーごとに 1 件、上書き保存）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushTokenRepository: Send + Sync {
    async fn store(&self, user_id: &UserId, token: PushToken) -> Result<(), RepositoryError>;

    async fn find(&self, user_id: &UserId) -> Result<Option<PushToken>, RepositoryError>;
}
