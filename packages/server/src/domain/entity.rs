//! Entities

use super::value_object::{
    Coordinates, DisplayName, FamilyId, JoinToken, MessageBody, ReminderId, Role, RoomCode,
    Timestamp, UserId,
};

/// チャットルーム
///
/// 1 つの家族につき、生存中のルームは最大 1 つ。
/// `member_count` は接続中のコネクション数で、切断により 0 以下になった時点で削除されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: RoomCode,
    pub family_id: FamilyId,
    pub member_count: i64,
}

impl Room {
    /// 参加者 0 人の新しいルームを作成
    pub fn new(code: RoomCode, family_id: FamilyId) -> Self {
        Self {
            code,
            family_id,
            member_count: 0,
        }
    }

    /// 指定した家族が所有するルームかどうか
    pub fn is_owned_by(&self, family_id: &FamilyId) -> bool {
        &self.family_id == family_id
    }
}

/// チャットメッセージ（追記のみ、更新・個別削除はされない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room: RoomCode,
    pub name: DisplayName,
    pub message: MessageBody,
    pub created_at: Timestamp,
    pub user: UserId,
}

/// 接続中のコネクションに紐づくセッション（プロセス内のみ、永続化しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub room: RoomCode,
    pub name: DisplayName,
    pub user: UserId,
    pub connected_at: Timestamp,
}

/// JoinRoom で発行され、Connect で一度だけ消費される入室許可
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTicket {
    pub token: JoinToken,
    pub room: RoomCode,
    pub family_id: FamilyId,
    pub name: DisplayName,
    pub user: UserId,
    pub expires_at: Timestamp,
}

impl JoinTicket {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// ユーザー（介護者または患者）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub role: Role,
    pub family_id: Option<FamilyId>,
}

/// 家族グループ（介護者 + 最大 1 人の患者）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub id: FamilyId,
    pub created_by: UserId,
    pub members: Vec<UserId>,
    pub patient: Option<UserId>,
}

impl Family {
    /// 介護者 1 人で構成される新しい家族を作成
    pub fn new(id: FamilyId, caregiver: UserId) -> Self {
        Self {
            id,
            created_by: caregiver.clone(),
            members: vec![caregiver],
            patient: None,
        }
    }

    /// メンバーを追加（すでに含まれていれば何もしない）
    ///
    /// 追加した場合は `true` を返す
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.members.contains(&user) {
            return false;
        }
        self.members.push(user);
        true
    }
}

/// 患者のリマインダー
///
/// 日付・時刻・状態はクライアントが決めた文字列をそのまま保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    /// リマインダーの持ち主（患者）
    pub user: UserId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub urgent: bool,
    pub important: bool,
}

/// リマインダーの部分更新（`None` の項目は変更しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
}

impl ReminderChanges {
    /// 変更する項目がひとつもない
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// 変更を適用し、値が変わった場合は `true` を返す
    pub fn apply_to(self, reminder: &mut Reminder) -> bool {
        fn set<T: PartialEq>(field: &mut T, value: Option<T>) -> bool {
            match value {
                Some(value) if *field != value => {
                    *field = value;
                    true
                }
                _ => false,
            }
        }

        // 短絡評価させないよう、すべての項目を先に適用する
        let changed = [
            set(&mut reminder.title, self.title),
            set(&mut reminder.description, self.description),
            set(&mut reminder.date, self.date),
            set(&mut reminder.time, self.time),
            set(&mut reminder.status, self.status),
            set(&mut reminder.urgent, self.urgent),
            set(&mut reminder.important, self.important),
        ];
        changed.contains(&true)
    }
}

/// 患者の保存済み位置情報
#[derive(Debug, Clone, PartialEq)]
pub struct SavedLocations {
    pub user: UserId,
    /// 安全な場所（自宅）
    pub home: Option<Coordinates>,
    /// 最後に報告された現在地
    pub current: Option<Coordinates>,
}

impl SavedLocations {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            home: None,
            current: None,
        }
    }
}

/// 顔認識で本人を思い出す手がかりとなる追加情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryProfile {
    pub user: UserId,
    /// 登録時点のユーザー名
    pub name: DisplayName,
    pub relation: String,
    pub tagline: String,
    pub trigger_memory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(value: &str) -> UserId {
        UserId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_new_room_has_no_members() {
        // テスト項目: 作成直後のルームの参加者数は 0
        // given (前提条件):
        let code = RoomCode::new("ABCDEFGH".to_string()).unwrap();
        let family = FamilyId::new("f1".to_string()).unwrap();

        // when (操作):
        let room = Room::new(code, family.clone());

        // then (期待する結果):
        assert_eq!(room.member_count, 0);
        assert!(room.is_owned_by(&family));
        assert!(!room.is_owned_by(&FamilyId::new("f2".to_string()).unwrap()));
    }

    #[test]
    fn test_ticket_expires_at_deadline() {
        // テスト項目: 有効期限ちょうどの時刻でチケットは失効する
        // given (前提条件):
        let ticket = JoinTicket {
            token: JoinToken::new("t".to_string()).unwrap(),
            room: RoomCode::new("ABCDEFGH".to_string()).unwrap(),
            family_id: FamilyId::new("f1".to_string()).unwrap(),
            name: DisplayName::new("Asha".to_string()).unwrap(),
            user: user_id("USIDAAAA"),
            expires_at: Timestamp::new(1_000),
        };

        // when (操作) / then (期待する結果):
        assert!(!ticket.is_expired(Timestamp::new(999)));
        assert!(ticket.is_expired(Timestamp::new(1_000)));
    }

    #[test]
    fn test_family_add_member_is_idempotent() {
        // テスト項目: 同じメンバーを 2 回追加しても 1 回分しか登録されない
        // given (前提条件):
        let mut family = Family::new(FamilyId::new("f1".to_string()).unwrap(), user_id("CG1"));

        // when (操作):
        let first = family.add_member(user_id("CG2"));
        let second = family.add_member(user_id("CG2"));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(family.members, vec![user_id("CG1"), user_id("CG2")]);
    }

    fn reminder() -> Reminder {
        Reminder {
            id: ReminderId::new("AB12CD34".to_string()).unwrap(),
            user: user_id("PAT1"),
            title: "Medicine".to_string(),
            description: "After breakfast".to_string(),
            date: "2024-05-01".to_string(),
            time: "09:00".to_string(),
            status: "pending".to_string(),
            urgent: false,
            important: true,
        }
    }

    #[test]
    fn test_reminder_changes_apply_only_given_fields() {
        // テスト項目: 指定した項目だけが更新され、変更の有無が返る
        // given (前提条件):
        let mut target = reminder();
        let changes = ReminderChanges {
            status: Some("done".to_string()),
            urgent: Some(true),
            ..Default::default()
        };

        // when (操作):
        let changed = changes.apply_to(&mut target);

        // then (期待する結果):
        assert!(changed);
        assert_eq!(target.status, "done");
        assert!(target.urgent);
        assert_eq!(target.title, "Medicine");
    }

    #[test]
    fn test_reminder_changes_with_same_values_are_no_change() {
        // テスト項目: 現在と同じ値での更新は「変更なし」、空の変更は is_empty
        // given (前提条件):
        let mut target = reminder();
        let same = ReminderChanges {
            title: Some("Medicine".to_string()),
            important: Some(true),
            ..Default::default()
        };

        // when (操作):
        let changed = same.clone().apply_to(&mut target);

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(target, reminder());
        assert!(!same.is_empty());
        assert!(ReminderChanges::default().is_empty());
    }
}
