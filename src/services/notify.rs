//! Process-wide change-notification registry
//!
//! One broadcast channel per topic. Publishing is fire-and-forget: events
//! sent while no dashboard is subscribed are dropped, and a send failure
//! never reaches the caller. Receivers are dropped by the SSE layer on
//! client disconnect.

use serde::Serialize;
use tokio::sync::broadcast;

/// Notification topics, one per live dashboard feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Properties,
    Areas,
    Employees,
    Schedules,
    Attendance,
}

/// A named event with a JSON payload, as forwarded to SSE clients
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub name: String,
    pub payload: serde_json::Value,
}

#[derive(Clone)]
pub struct ChangeNotifier {
    properties: broadcast::Sender<ChangeEvent>,
    areas: broadcast::Sender<ChangeEvent>,
    employees: broadcast::Sender<ChangeEvent>,
    schedules: broadcast::Sender<ChangeEvent>,
    attendance: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Create the registry with a bounded per-topic buffer; slow
    /// subscribers that lag past it miss events rather than block senders
    pub fn new(capacity: usize) -> Self {
        Self {
            properties: broadcast::channel(capacity).0,
            areas: broadcast::channel(capacity).0,
            employees: broadcast::channel(capacity).0,
            schedules: broadcast::channel(capacity).0,
            attendance: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<ChangeEvent> {
        match topic {
            Topic::Properties => &self.properties,
            Topic::Areas => &self.areas,
            Topic::Employees => &self.employees,
            Topic::Schedules => &self.schedules,
            Topic::Attendance => &self.attendance,
        }
    }

    /// Best-effort publish; never fails
    pub fn publish(&self, topic: Topic, name: &str, payload: serde_json::Value) {
        let _ = self.sender(topic).send(ChangeEvent {
            name: name.to_string(),
            payload,
        });
    }

    /// Subscribe a new receiver to a topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<ChangeEvent> {
        self.sender(topic).subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}
