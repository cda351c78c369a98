//! Live-update SSE endpoints
//!
//! Each endpoint subscribes a fresh receiver to one topic of the change
//! notifier. Dropping the connection drops the receiver, which removes the
//! subscriber from the channel.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::services::notify::{ChangeNotifier, Topic};

use super::AuthenticatedUser;

fn event_stream(
    notifier: &ChangeNotifier,
    topic: Topic,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = notifier.subscribe(topic);

    let stream = BroadcastStream::new(receiver).filter_map(|message| {
        // lagged subscribers silently miss events
        let change = message.ok()?;
        let event = Event::default()
            .event(change.name)
            .json_data(&change.payload)
            .ok()?;
        Some(Ok::<_, Infallible>(event))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Property change events
pub async fn property_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_stream(&state.services.notifier, Topic::Properties)
}

/// Area change events
pub async fn area_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_stream(&state.services.notifier, Topic::Areas)
}

/// Employee change events
pub async fn employee_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_stream(&state.services.notifier, Topic::Employees)
}

/// Schedule change events
pub async fn schedule_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_stream(&state.services.notifier, Topic::Schedules)
}

/// Attendance events from terminal check-ins
pub async fn attendance_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    event_stream(&state.services.notifier, Topic::Attendance)
}
