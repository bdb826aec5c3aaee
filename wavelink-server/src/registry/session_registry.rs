use crate::error::RegistryError;
use crate::registry::room::{Room, RoomStats};
use dashmap::DashMap;
use tracing::info;
use wavelink_core::{ConnectionId, ConnectionQuality, Participant, ParticipantSummary};

/// What a departing participant leaves behind: the removed entry plus the
/// members that should receive the user-left broadcast.
#[derive(Debug)]
pub struct Departure {
    pub participant: Participant,
    pub remaining: Vec<ConnectionId>,
}

/// In-memory room -> participants store.
///
/// Each room's membership is a single critical section: all mutations for a
/// given room happen under its map entry lock, so concurrent joins and
/// leaves can never produce lost updates. Rooms are created lazily on first
/// join and deleted the instant they become empty.
pub struct SessionRegistry {
    rooms: DashMap<String, Room>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Add a participant to its room, creating the room if needed.
    ///
    /// `notify` receives the membership snapshot as it was at the instant of
    /// join (never including the joiner) and is invoked while the room entry
    /// is still locked, so a later joiner's broadcast can never be enqueued
    /// ahead of this snapshot. The callback must only perform non-blocking
    /// work and must not touch the registry.
    pub fn join<F>(&self, participant: Participant, notify: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&[ParticipantSummary]),
    {
        let room_id = participant.room_id.clone();
        let mut room = self.rooms.entry(room_id.clone()).or_default();

        if room.contains(&participant.connection_id) {
            return Err(RegistryError::DuplicateParticipant {
                room: room_id,
                participant: participant.connection_id.clone(),
            });
        }

        let others = room.summaries_excluding(&participant.connection_id);
        info!(
            "Participant {} ({}) joined room '{}' ({} already present)",
            participant.connection_id,
            participant.username,
            room_id,
            others.len()
        );
        room.insert(participant);

        notify(&others);
        Ok(())
    }

    /// Remove a participant; delete the room once it is empty.
    pub fn leave(&self, room_id: &str, id: &ConnectionId) -> Option<Departure> {
        let departure = {
            let mut room = self.rooms.get_mut(room_id)?;
            let participant = room.remove(id)?;
            Departure {
                participant,
                remaining: room.member_ids(),
            }
        };

        let removed = self
            .rooms
            .remove_if(room_id, |_, room| room.is_empty())
            .is_some();
        if removed {
            info!("Room '{}' is empty, deleting", room_id);
        }

        Some(departure)
    }

    /// Update a participant's quality tag; returns the other members to
    /// notify. `RoomNotFound` covers both an unknown room and a sender that
    /// never joined it.
    pub fn update_quality(
        &self,
        room_id: &str,
        id: &ConnectionId,
        quality: ConnectionQuality,
    ) -> Result<Vec<ConnectionId>, RegistryError> {
        let mut room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_owned()))?;

        if !room.set_quality(id, quality) {
            return Err(RegistryError::RoomNotFound(room_id.to_owned()));
        }

        Ok(room.member_ids_excluding(id))
    }

    /// Snapshot of every member id, the sender included (chat fan-out).
    pub fn members(&self, room_id: &str) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }

    /// Snapshot of participant summaries excluding the caller.
    pub fn list_others(&self, room_id: &str, excluding: &ConnectionId) -> Vec<ParticipantSummary> {
        self.rooms
            .get(room_id)
            .map(|room| room.summaries_excluding(excluding))
            .unwrap_or_default()
    }

    pub fn participant_count(&self, room_id: &str) -> Option<usize> {
        self.rooms.get(room_id).map(|room| room.len())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn stats(&self) -> Vec<RoomStats> {
        self.rooms
            .iter()
            .map(|entry| RoomStats {
                room_id: entry.key().clone(),
                user_count: entry.value().len(),
                usernames: entry.value().usernames(),
            })
            .collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
