use serde::Serialize;
use wavelink_core::{ConnectionId, ConnectionQuality, Participant, ParticipantSummary};

/// Membership of one room. Kept in join order so presence snapshots are
/// deterministic. Only the registry mutates this, under the map entry lock.
#[derive(Debug, Default)]
pub(crate) struct Room {
    participants: Vec<Participant>,
}

impl Room {
    pub(crate) fn contains(&self, id: &ConnectionId) -> bool {
        self.participants.iter().any(|p| &p.connection_id == id)
    }

    pub(crate) fn insert(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    pub(crate) fn remove(&mut self, id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == id)?;
        Some(self.participants.remove(index))
    }

    pub(crate) fn set_quality(
        &mut self,
        id: &ConnectionId,
        quality: ConnectionQuality,
    ) -> bool {
        match self.participants.iter_mut().find(|p| &p.connection_id == id) {
            Some(p) => {
                p.quality = quality;
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.participants.len()
    }

    pub(crate) fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    pub(crate) fn member_ids_excluding(&self, excluding: &ConnectionId) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .filter(|p| &p.connection_id != excluding)
            .map(|p| p.connection_id.clone())
            .collect()
    }

    pub(crate) fn summaries_excluding(&self, excluding: &ConnectionId) -> Vec<ParticipantSummary> {
        self.participants
            .iter()
            .filter(|p| &p.connection_id != excluding)
            .map(Participant::summary)
            .collect()
    }

    pub(crate) fn usernames(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.username.clone()).collect()
    }
}

/// Per-room line of the stats query.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomStats {
    pub room_id: String,
    pub user_count: usize,
    pub usernames: Vec<String>,
}
