/**
 * Room Registry
 *
 * Live subscriptions per team, shared by every connection task and the
 * message store. All state is process memory; nothing survives a restart
 * or a disconnect. Join, leave and disconnect are the only mutation entry
 * points, so handlers never touch the map directly.
 *
 * Delivery pushes onto each subscriber's unbounded outbound queue and
 * never waits for the socket, so one slow client cannot stall a room.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::events::ServerEvent;

/// Identifier for one live connection. A user on several devices holds
/// several connection ids, each subscribing independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound queue handle for one connection. A closed receiver means the
/// connection is gone; events for it are discarded.
pub type OutboundSender = mpsc::UnboundedSender<ServerEvent>;

/// Registry of live room subscriptions, keyed by team id.
///
/// Cloning is cheap; all clones share one map.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<HashMap<Uuid, HashMap<ConnectionId, OutboundSender>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe a connection to a team's room. Joining twice is a no-op.
    pub fn join(&self, team_id: Uuid, conn: ConnectionId, sender: OutboundSender) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(team_id)
            .or_default()
            .entry(conn)
            .or_insert(sender);
    }

    /// Unsubscribe a connection from a team's room.
    pub fn leave(&self, team_id: Uuid, conn: ConnectionId) {
        let mut rooms = self.rooms.lock().unwrap();
        if let Some(room) = rooms.get_mut(&team_id) {
            room.remove(&conn);
            if room.is_empty() {
                rooms.remove(&team_id);
            }
        }
    }

    /// Remove a connection from every room it subscribes to.
    ///
    /// Called when the transport session ends. This cancels future
    /// deliveries only; store operations the same user already issued
    /// still complete to durability.
    pub fn disconnect(&self, conn: ConnectionId) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms.retain(|_, room| {
            room.remove(&conn);
            !room.is_empty()
        });
    }

    /// Whether a connection currently subscribes to a team's room.
    pub fn is_subscribed(&self, team_id: Uuid, conn: ConnectionId) -> bool {
        let rooms = self.rooms.lock().unwrap();
        rooms
            .get(&team_id)
            .is_some_and(|room| room.contains_key(&conn))
    }

    /// Number of connections currently subscribed to a team's room.
    pub fn subscriber_count(&self, team_id: Uuid) -> usize {
        let rooms = self.rooms.lock().unwrap();
        rooms.get(&team_id).map_or(0, HashMap::len)
    }

    /// Deliver an event to every subscriber of a room
    ///
    /// Returns how many outbound queues accepted the event. Connections
    /// whose receiver is gone are skipped silently.
    pub fn broadcast(&self, team_id: Uuid, event: &ServerEvent) -> usize {
        self.send_where(team_id, event, |_| true)
    }

    /// Deliver an event to every subscriber of a room except the sender
    pub fn broadcast_to_others(
        &self,
        team_id: Uuid,
        from: ConnectionId,
        event: &ServerEvent,
    ) -> usize {
        self.send_where(team_id, event, |conn| *conn != from)
    }

    fn send_where(
        &self,
        team_id: Uuid,
        event: &ServerEvent,
        keep: impl Fn(&ConnectionId) -> bool,
    ) -> usize {
        let rooms = self.rooms.lock().unwrap();
        let Some(room) = rooms.get(&team_id) else {
            return 0;
        };

        let mut delivered = 0;
        for (conn, sender) in room.iter() {
            if keep(conn) && sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing_event() -> ServerEvent {
        ServerEvent::UserTyping {
            user_id: Uuid::new_v4(),
            name: "Alice".to_string(),
        }
    }

    fn subscriber() -> (OutboundSender, mpsc::UnboundedReceiver<ServerEvent>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_join_is_idempotent() {
        let registry = RoomRegistry::new();
        let team = Uuid::new_v4();
        let conn = ConnectionId::new();
        let (tx, mut rx) = subscriber();

        registry.join(team, conn, tx.clone());
        registry.join(team, conn, tx);
        assert_eq!(registry.subscriber_count(team), 1);

        registry.broadcast(team, &typing_event());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_leave_removes_subscription() {
        let registry = RoomRegistry::new();
        let team = Uuid::new_v4();
        let conn = ConnectionId::new();
        let (tx, _rx) = subscriber();

        registry.join(team, conn, tx);
        assert!(registry.is_subscribed(team, conn));

        registry.leave(team, conn);
        assert!(!registry.is_subscribed(team, conn));
        assert_eq!(registry.subscriber_count(team), 0);
    }

    #[test]
    fn test_disconnect_sweeps_all_rooms() {
        let registry = RoomRegistry::new();
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        let conn = ConnectionId::new();
        let other = ConnectionId::new();
        let (tx, _rx) = subscriber();
        let (other_tx, _other_rx) = subscriber();

        registry.join(team_a, conn, tx.clone());
        registry.join(team_b, conn, tx);
        registry.join(team_b, other, other_tx);

        registry.disconnect(conn);

        assert!(!registry.is_subscribed(team_a, conn));
        assert!(!registry.is_subscribed(team_b, conn));
        assert!(registry.is_subscribed(team_b, other));
    }

    #[test]
    fn test_broadcast_reaches_all_subscribers() {
        let registry = RoomRegistry::new();
        let team = Uuid::new_v4();
        let first = ConnectionId::new();
        let second = ConnectionId::new();
        let (first_tx, mut first_rx) = subscriber();
        let (second_tx, mut second_rx) = subscriber();

        registry.join(team, first, first_tx);
        registry.join(team, second, second_tx);

        let delivered = registry.broadcast(team, &typing_event());
        assert_eq!(delivered, 2);
        assert!(first_rx.try_recv().is_ok());
        assert!(second_rx.try_recv().is_ok());
    }

    #[test]
    fn test_broadcast_to_others_excludes_sender() {
        let registry = RoomRegistry::new();
        let team = Uuid::new_v4();
        let sender = ConnectionId::new();
        let other = ConnectionId::new();
        let (sender_tx, mut sender_rx) = subscriber();
        let (other_tx, mut other_rx) = subscriber();

        registry.join(team, sender, sender_tx);
        registry.join(team, other, other_tx);

        let delivered = registry.broadcast_to_others(team, sender, &typing_event());
        assert_eq!(delivered, 1);
        assert!(sender_rx.try_recv().is_err());
        assert!(other_rx.try_recv().is_ok());
    }

    #[test]
    fn test_broadcast_skips_dropped_receivers() {
        let registry = RoomRegistry::new();
        let team = Uuid::new_v4();
        let gone = ConnectionId::new();
        let alive = ConnectionId::new();
        let (gone_tx, gone_rx) = subscriber();
        let (alive_tx, mut alive_rx) = subscriber();

        registry.join(team, gone, gone_tx);
        registry.join(team, alive, alive_tx);
        drop(gone_rx);

        let delivered = registry.broadcast(team, &typing_event());
        assert_eq!(delivered, 1);
        assert!(alive_rx.try_recv().is_ok());
    }

    #[test]
    fn test_broadcast_to_empty_room() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.broadcast(Uuid::new_v4(), &typing_event()), 0);
    }
}
