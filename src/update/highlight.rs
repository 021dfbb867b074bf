//! Rainbow highlighting update handlers
//!
//! Scheduling is driven by a per-session generation counter. Every notify or
//! dispatch bumps it, and timers or continuations that come back carrying an
//! older generation are dropped on arrival.

use std::time::Instant;

use crate::brackets::{match_brackets, resolve_dirty_range, DirtyRange, EditDescriptor};
use crate::commands::Cmd;
use crate::config::HighlightConfig;
use crate::liveness::is_live;
use crate::markup::{apply_highlights, ApplyStats};
use crate::messages::HighlightMsg;
use crate::model::{AppModel, EditorSession, InFlight, PendingRequest, RecomputeRequest, SessionId};
use crate::theme::ColorScheme;

/// Handle highlight-related messages
pub fn update_highlight(model: &mut AppModel, msg: HighlightMsg) -> Option<Cmd> {
    match msg {
        HighlightMsg::Open(session) => on_open(model, session),
        HighlightMsg::Rehighlight(session) => notify_immediate(model, session),
        HighlightMsg::Dispose(session) => on_dispose(model, session),
        HighlightMsg::DebounceElapsed {
            session,
            generation,
        } => dispatch(model, session, generation),
        HighlightMsg::LivenessConfirmed {
            session,
            generation,
        } => run_pass(model, session, generation),
    }
}

/// Take back a superseded in-flight request so its region is not lost
fn reclaim_in_flight(session: &mut EditorSession, request: RecomputeRequest) -> RecomputeRequest {
    match session.in_flight.take() {
        Some(older) => {
            tracing::debug!(
                "Session {}: superseding in-flight generation {}",
                session.id.0,
                older.generation
            );
            older.request.merge(request)
        }
        None => request,
    }
}

/// Record a buffer edit and schedule a debounced recompute
///
/// The session's markers are moved for the edit right away; a request that
/// is still pending or in flight is merged with the edit, so one recompute
/// covers the whole burst.
pub fn on_edit(model: &mut AppModel, id: SessionId, edit: EditDescriptor) -> Option<Cmd> {
    let Some(session) = model.sessions.get_mut(&id) else {
        tracing::debug!("on_edit: session {} not found", id.0);
        return None;
    };
    session.markup.apply_edit(&edit);

    let request = reclaim_in_flight(session, RecomputeRequest::Edit(edit));
    notify(model, id, request)
}

/// Record or refresh the session's pending request and restart its timer
///
/// A request that has not been dispatched yet is replaced by the merged
/// request, never queued behind it.
pub fn notify(model: &mut AppModel, id: SessionId, request: RecomputeRequest) -> Option<Cmd> {
    let delay = model.config.debounce();
    let session = model.sessions.get_mut(&id)?;

    let request = match session.pending.take() {
        Some(older) => older.request.merge(request),
        None => request,
    };
    let generation = session.next_generation();
    session.pending = Some(PendingRequest {
        generation,
        scheduled_at: Instant::now(),
        request,
    });

    tracing::trace!(
        "Session {}: recompute scheduled (generation {}, {:?})",
        id.0,
        generation,
        request
    );
    Some(Cmd::ScheduleRecompute {
        session: id,
        generation,
        delay,
    })
}

/// Dispatch a full rescan with no debounce delay
pub fn notify_immediate(model: &mut AppModel, id: SessionId) -> Option<Cmd> {
    let session = model.sessions.get_mut(&id)?;
    // A pending request is absorbed by the full rescan
    session.pending = None;
    let request = reclaim_in_flight(session, RecomputeRequest::FullRescan);
    let generation = session.next_generation();
    Some(start_dispatch(session, generation, request))
}

/// Open a session: paint the whole buffer right away
pub fn on_open(model: &mut AppModel, id: SessionId) -> Option<Cmd> {
    tracing::debug!("Session {} opened", id.0);
    notify_immediate(model, id)
}

/// Drop a session with everything it owns
///
/// Pending and in-flight requests go with it; continuations that arrive
/// afterwards find no session and do nothing.
pub fn on_dispose(model: &mut AppModel, id: SessionId) -> Option<Cmd> {
    let Some(mut session) = model.sessions.remove(&id) else {
        tracing::debug!("on_dispose: session {} already gone", id.0);
        return None;
    };
    session.editor.dispose();
    let removed = session.markers.clear(&mut *session.markup);
    tracing::debug!("Session {} disposed, removed {} marker(s)", id.0, removed);
    None
}

fn start_dispatch(session: &mut EditorSession, generation: u64, request: RecomputeRequest) -> Cmd {
    session.in_flight = Some(InFlight {
        generation,
        request,
    });
    Cmd::CheckLiveness {
        session: session.id,
        generation,
        probe: session.probe(),
        modality: session.modality,
    }
}

/// Debounce timer ran out: dispatch if nothing newer arrived meanwhile
fn dispatch(model: &mut AppModel, id: SessionId, generation: u64) -> Option<Cmd> {
    let Some(session) = model.sessions.get_mut(&id) else {
        tracing::debug!("Debounce elapsed for disposed session {}", id.0);
        return None;
    };

    let pending = match session.pending {
        Some(pending) if pending.generation == generation => pending,
        _ => {
            tracing::debug!(
                "Session {}: skipping stale debounce (generation {})",
                id.0,
                generation
            );
            return None;
        }
    };
    session.pending = None;

    tracing::trace!(
        "Session {}: dispatching after {:?}",
        id.0,
        pending.scheduled_at.elapsed()
    );
    let request = reclaim_in_flight(session, pending.request);
    Some(start_dispatch(session, generation, request))
}

/// UI-thread continuation: re-check liveness and run the pass
fn run_pass(model: &mut AppModel, id: SessionId, generation: u64) -> Option<Cmd> {
    let AppModel {
        sessions,
        config,
        theme,
        ..
    } = model;
    let Some(session) = sessions.get_mut(&id) else {
        tracing::debug!("Continuation for disposed session {}", id.0);
        return None;
    };

    let in_flight = match session.in_flight {
        Some(in_flight) if in_flight.generation == generation => in_flight,
        _ => {
            tracing::debug!(
                "Session {}: dropping superseded continuation (generation {})",
                id.0,
                generation
            );
            return None;
        }
    };
    session.in_flight = None;

    if !is_live(&session.probe()) {
        tracing::debug!("Session {}: editor no longer live, aborting pass", id.0);
        return None;
    }

    let (range, stats) = recompute_pass(session, in_flight.request, config, &theme.palette);
    if stats.removed == 0 && stats.added == 0 {
        return None;
    }
    Some(Cmd::Redraw { session: id, range })
}

/// Resolve, match and apply for one request against the current buffer
///
/// The syntax tree and dirty range are derived fresh from the buffer.
/// With `colored_parentheses` off the range is only cleared.
pub fn recompute_pass(
    session: &mut EditorSession,
    request: RecomputeRequest,
    config: &HighlightConfig,
    scheme: &dyn ColorScheme,
) -> (DirtyRange, ApplyStats) {
    let buffer_len = session.document.len_bytes();
    let syntax = session.document.syntax();
    let range = resolve_dirty_range(buffer_len, syntax, request.edit());

    let pairs = if config.colored_parentheses {
        match_brackets(&syntax.tokens(range.as_range()), range.as_range())
    } else {
        Vec::new()
    };

    let stats = apply_highlights(
        &mut session.markers,
        &mut *session.markup,
        scheme,
        range,
        &pairs,
    );
    tracing::trace!(
        "Session {}: pass over {}..{} removed {} added {}",
        session.id.0,
        range.start,
        range.end,
        stats.removed,
        stats.added
    );
    (range, stats)
}
