// src/engine.rs

use crate::catalog::LevelCatalog;
use crate::feedback::FeedbackSink;
use crate::models::{Cue, Settings};
use crate::scheduler::Scheduler;
use crate::session::{self, Action, Effect, Pacing, SessionState, Timer};
use crate::store::ProgressStore;
use log::debug;
use std::time::Duration;

/// Owns the collaborators and runs actions through the reducer.
///
/// State is replaced synchronously first; persistence, cues and timers are
/// applied afterwards in the order the reducer emitted them.
pub struct Engine<F: FeedbackSink> {
    catalog: LevelCatalog,
    store: ProgressStore,
    feedback: F,
    scheduler: Scheduler<Timer>,
    pacing: Pacing,
    state: SessionState,
}

impl<F: FeedbackSink> Engine<F> {
    pub fn new(
        catalog: LevelCatalog,
        store: ProgressStore,
        feedback: F,
        settings: Settings,
        pacing: Pacing,
    ) -> Self {
        let unlocked = store.load_unlocked();
        let score = store.load_score();
        debug!("Progress loaded: {} unlocked, score {}", unlocked.len(), score);

        let mut engine = Engine {
            catalog,
            store,
            feedback,
            scheduler: Scheduler::new(),
            pacing,
            state: SessionState::new(unlocked, score, settings),
        };
        if settings.music_playing() {
            engine.feedback.notify(Cue::MusicOn);
        }
        engine
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time until the next timer fires, if any is pending.
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    pub fn dispatch(&mut self, action: Action) -> &SessionState {
        let state = std::mem::take(&mut self.state);
        let transition = session::reduce(state, action, &self.catalog, &self.pacing);
        self.state = transition.state;
        for effect in transition.effects {
            self.apply(effect);
        }
        &self.state
    }

    /// Moves virtual time forward, firing due timers in deadline order.
    pub fn advance(&mut self, delta: Duration) -> &SessionState {
        for timer in self.scheduler.advance(delta) {
            debug!("Timer fired: {:?}", timer);
            self.dispatch(Action::TimerElapsed(timer));
        }
        &self.state
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Notify(cue) => self.feedback.notify(cue),
            Effect::SaveScore(score) => self.store.save_score(score),
            Effect::SaveUnlocked(unlocked) => self.store.save_unlocked(&unlocked),
            Effect::ClearProgress => self.store.reset(),
            Effect::Schedule { after, timer } => {
                self.scheduler.schedule(after, timer);
            }
            Effect::CancelTimers => self.scheduler.cancel_all(),
        }
    }
}
