//! InMemory Join Ticket Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{JoinTicket, JoinTicketRepository, JoinToken, RepositoryError, Timestamp};

/// インメモリ Join Ticket ストア
#[derive(Default)]
pub struct InMemoryJoinTicketRepository {
    tickets: Mutex<HashMap<JoinToken, JoinTicket>>,
}

impl InMemoryJoinTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているチケット数（失効済みを含む）
    pub async fn len(&self) -> usize {
        self.tickets.lock().await.len()
    }
}

#[async_trait]
impl JoinTicketRepository for InMemoryJoinTicketRepository {
    async fn issue(&self, ticket: JoinTicket) -> Result<(), RepositoryError> {
        let mut tickets = self.tickets.lock().await;
        tickets.insert(ticket.token.clone(), ticket);
        Ok(())
    }

    async fn consume(
        &self,
        token: &JoinToken,
        now: Timestamp,
    ) -> Result<Option<JoinTicket>, RepositoryError> {
        let mut tickets = self.tickets.lock().await;
        Ok(tickets
            .remove(token)
            .filter(|ticket| !ticket.is_expired(now)))
    }

    async fn purge_expired(&self, now: Timestamp) -> Result<usize, RepositoryError> {
        let mut tickets = self.tickets.lock().await;
        let before = tickets.len();
        tickets.retain(|_, ticket| !ticket.is_expired(now));
        Ok(before - tickets.len())
    }
}
