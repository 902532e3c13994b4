//! Member domain and in-memory repository.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: u64,
    pub username: String,
    pub age: u32,
}

impl Member {
    /// An unsaved member; `save` assigns the id.
    pub fn new(username: impl Into<String>, age: u32) -> Self {
        Self {
            id: 0,
            username: username.into(),
            age,
        }
    }
}

/// Thread-safe member store shared by every controller generation.
///
/// Ids come from an atomic sequence starting at 1.
#[derive(Debug, Default)]
pub struct MemberRepository {
    store: DashMap<u64, Member>,
    sequence: AtomicU64,
}

impl MemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, mut member: Member) -> Member {
        member.id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.store.insert(member.id, member.clone());
        member
    }

    pub fn find_by_id(&self, id: u64) -> Option<Member> {
        self.store.get(&id).map(|entry| entry.value().clone())
    }

    /// All members, ordered by id.
    pub fn find_all(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self.store.iter().map(|entry| entry.value().clone()).collect();
        members.sort_by_key(|m| m.id);
        members
    }

    pub fn clear_store(&self) {
        self.store.clear();
    }
}
