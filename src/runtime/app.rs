//! Headless UI loop
//!
//! Owns the model and the single UI queue. Commands that need to wait or to
//! look at liveness off the UI thread run on short-lived worker threads that
//! post messages back over the channel.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::brackets::DirtyRange;
use crate::commands::Cmd;
use crate::liveness::is_live;
use crate::messages::{HighlightMsg, Msg};
use crate::model::{AppModel, Modality, SessionId};
use crate::update::update;

/// A queued message and the modality it must wait for
///
/// Untagged messages run as soon as they are received.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub msg: Msg,
    pub modality: Option<Modality>,
}

impl Envelope {
    pub fn untagged(msg: Msg) -> Self {
        Self {
            msg,
            modality: None,
        }
    }

    pub fn tagged(msg: Msg, modality: Modality) -> Self {
        Self {
            msg,
            modality: Some(modality),
        }
    }
}

/// Decrements the job counter when a worker finishes, even on panic
struct JobGuard(Arc<AtomicUsize>);

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Release);
    }
}

pub struct Runtime {
    pub model: AppModel,
    msg_tx: Sender<Envelope>,
    msg_rx: Receiver<Envelope>,
    /// Messages waiting for the modal state to be left, oldest first
    deferred: VecDeque<Envelope>,
    /// Worker threads that may still post a message
    jobs: Arc<AtomicUsize>,
    redraws: Vec<(SessionId, DirtyRange)>,
}

impl Runtime {
    pub fn new(model: AppModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            deferred: VecDeque::new(),
            jobs: Arc::new(AtomicUsize::new(0)),
            redraws: Vec::new(),
        }
    }

    /// A handle other threads can post messages through
    pub fn sender(&self) -> Sender<Envelope> {
        self.msg_tx.clone()
    }

    /// Run a message on the UI thread right away
    ///
    /// Returns whether the host should repaint.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let before = self.model.modality;
        let needs_redraw = match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        };

        if self.model.modality < before {
            self.replay_deferred() || needs_redraw
        } else {
            needs_redraw
        }
    }

    fn spawn_job(&self, job: impl FnOnce(Sender<Envelope>) + Send + 'static) {
        let tx = self.msg_tx.clone();
        self.jobs.fetch_add(1, Ordering::AcqRel);
        let guard = JobGuard(Arc::clone(&self.jobs));
        std::thread::spawn(move || {
            let _guard = guard;
            job(tx);
        });
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::ScheduleRecompute {
                session,
                generation,
                delay,
            } => {
                self.spawn_job(move |tx| {
                    std::thread::sleep(delay);
                    let msg = Msg::Highlight(HighlightMsg::DebounceElapsed {
                        session,
                        generation,
                    });
                    let _ = tx.send(Envelope::untagged(msg));
                });
            }
            Cmd::CheckLiveness {
                session,
                generation,
                probe,
                modality,
            } => {
                self.spawn_job(move |tx| {
                    if !is_live(&probe) {
                        tracing::debug!(
                            "Session {}: editor not live on worker, dropping generation {}",
                            session.0,
                            generation
                        );
                        return;
                    }
                    let msg = Msg::Highlight(HighlightMsg::LivenessConfirmed {
                        session,
                        generation,
                    });
                    let _ = tx.send(Envelope::tagged(msg, modality));
                });
            }
            Cmd::Redraw { session, range } => self.redraws.push((session, range)),
        }
    }

    /// Run a received message now, or park it if the UI is too modal for it
    fn handle_envelope(&mut self, envelope: Envelope) -> bool {
        match envelope.modality {
            Some(tag) if !tag.can_run_under(self.model.modality) => {
                tracing::trace!(
                    "Deferring {:?} until modality {} (current {})",
                    envelope.msg,
                    tag.0,
                    self.model.modality.0
                );
                self.deferred.push_back(envelope);
                false
            }
            _ => self.dispatch(envelope.msg),
        }
    }

    /// Run deferred messages that may now run, in the order they arrived
    fn replay_deferred(&mut self) -> bool {
        let mut needs_redraw = false;
        let parked = std::mem::take(&mut self.deferred);
        for envelope in parked {
            needs_redraw |= self.handle_envelope(envelope);
        }
        needs_redraw
    }

    /// Drain everything workers have posted so far
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(envelope) = self.msg_rx.try_recv() {
            needs_redraw |= self.handle_envelope(envelope);
        }
        needs_redraw
    }

    /// Pump the queue until no worker is running and nothing is queued
    ///
    /// Deferred messages do not count; they wait for the modal state to be
    /// left. Returns false if `timeout` passed first.
    pub fn run_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let busy = self.jobs.load(Ordering::Acquire) > 0;
            self.process_async_messages();
            if !busy && self.jobs.load(Ordering::Acquire) == 0 {
                // Workers finished before the drain, so their sends were seen
                match self.msg_rx.try_recv() {
                    Ok(envelope) => {
                        self.handle_envelope(envelope);
                        continue;
                    }
                    Err(_) => return true,
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            match self
                .msg_rx
                .recv_timeout((deadline - now).min(Duration::from_millis(10)))
            {
                Ok(envelope) => {
                    self.handle_envelope(envelope);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return true,
            }
        }
    }

    /// Number of worker threads still running
    pub fn pending_jobs(&self) -> usize {
        self.jobs.load(Ordering::Acquire)
    }

    /// Number of messages parked behind a modal state
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Ranges repainted since the last call
    pub fn take_redraws(&mut self) -> Vec<(SessionId, DirtyRange)> {
        std::mem::take(&mut self.redraws)
    }
}
