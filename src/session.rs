// src/session.rs

use crate::catalog::LevelCatalog;
use crate::constants::*;
use crate::evaluator::{self, Evaluation};
use crate::models::{Cue, Feedback, Level, Phase, Settings};
use crate::scoring;
use log::{debug, info};
use std::collections::BTreeSet;
use std::time::Duration;

// --- State ---

/// Everything the presentation layer reads. Passed by value through `reduce`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    /// Catalog index; only meaningful in `Playing` and `Summary`.
    pub current_level: Option<usize>,
    /// Wrong submissions since the current level was entered.
    pub attempts: u32,
    pub feedback: Feedback,
    pub raw_input: String,
    pub hint_visible: bool,
    pub unlocked: BTreeSet<u32>,
    pub score: u64,
    /// Wrong submissions across the whole session.
    pub total_attempts: u32,
    /// Points from the most recent solve.
    pub last_award: Option<u64>,
    pub settings: Settings,
    /// Bumped on every level entry and on leaving a level; timers carry it.
    pub visit: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(
            BTreeSet::from([FIRST_LEVEL_ID]),
            0,
            Settings::default(),
        )
    }
}

impl SessionState {
    pub fn new(unlocked: BTreeSet<u32>, score: u64, settings: Settings) -> Self {
        SessionState {
            phase: Phase::Home,
            current_level: None,
            attempts: 0,
            feedback: Feedback::None,
            raw_input: String::new(),
            hint_visible: false,
            unlocked,
            score,
            total_attempts: 0,
            last_award: None,
            settings,
            visit: 0,
        }
    }

    pub fn is_unlocked(&self, id: u32) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn level<'a>(&self, catalog: &'a LevelCatalog) -> Option<&'a Level> {
        match self.phase {
            Phase::Playing | Phase::Summary => catalog.get(self.current_level?),
            Phase::Home | Phase::LevelSelect => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Summary
            || (self.phase == Phase::Playing && self.feedback == Feedback::Correct)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Playing
            && self.feedback == Feedback::None
            && evaluator::is_submittable(&self.raw_input)
    }

    pub fn visible_hint<'a>(&self, catalog: &'a LevelCatalog) -> Option<&'a str> {
        if !self.hint_visible {
            return None;
        }
        self.level(catalog).map(|l| l.hint.as_str())
    }

    /// The rule explanation, only once the level is solved.
    pub fn revealed_logic<'a>(&self, catalog: &'a LevelCatalog) -> Option<&'a str> {
        if !self.is_solved() {
            return None;
        }
        self.level(catalog).map(|l| l.logic.as_str())
    }

    /// Unlocked levels as a whole percentage of the catalog.
    pub fn progress_percent(&self, catalog: &LevelCatalog) -> usize {
        let unlocked = self
            .unlocked
            .iter()
            .filter(|id| catalog.find_by_id(**id).is_some())
            .count();
        unlocked * 100 / catalog.count().max(1)
    }

    pub fn has_next_level(&self, catalog: &LevelCatalog) -> bool {
        self.current_level
            .is_some_and(|idx| idx + 1 < catalog.count())
    }
}

// --- Actions & Effects ---

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start,
    SelectLevel(u32),
    EditInput(String),
    Submit,
    ShowHint,
    Advance,
    ReturnToMap,
    GoHome,
    ResetProgress,
    ToggleSound,
    ToggleVibration,
    ToggleMusic,
    TimerElapsed(Timer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    ShowSummary { visit: u64 },
    ClearFeedback { visit: u64 },
}

/// Side effects requested by a transition, applied by the driver afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Cue),
    SaveScore(u64),
    SaveUnlocked(BTreeSet<u32>),
    ClearProgress,
    Schedule { after: Duration, timer: Timer },
    CancelTimers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub correct_delay: Duration,
    pub wrong_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            correct_delay: Duration::from_millis(CORRECT_DELAY_MS),
            wrong_delay: Duration::from_millis(WRONG_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: SessionState) -> Self {
        Transition {
            state,
            effects: Vec::new(),
        }
    }
}

// --- Reducer ---

pub fn reduce(
    state: SessionState,
    action: Action,
    catalog: &LevelCatalog,
    pacing: &Pacing,
) -> Transition {
    let mut t = Transition::unchanged(state);
    match action {
        Action::Start => start(&mut t),
        Action::SelectLevel(id) => select_level(&mut t, id, catalog),
        Action::EditInput(text) => edit_input(&mut t, text),
        Action::Submit => submit(&mut t, catalog, pacing),
        Action::ShowHint => show_hint(&mut t),
        Action::Advance => advance(&mut t, catalog),
        Action::ReturnToMap => return_to_map(&mut t),
        Action::GoHome => go_home(&mut t),
        Action::ResetProgress => reset_progress(&mut t),
        Action::ToggleSound => toggle_sound(&mut t),
        Action::ToggleVibration => {
            t.state.settings.vibration = !t.state.settings.vibration;
        }
        Action::ToggleMusic => toggle_music(&mut t),
        Action::TimerElapsed(timer) => timer_elapsed(&mut t, timer),
    }
    t
}

fn cue(t: &mut Transition, cue: Cue) {
    let settings = t.state.settings;
    let enabled = match cue {
        Cue::Click | Cue::Success | Cue::Error => settings.sound,
        Cue::Vibrate { .. } => settings.vibration,
        Cue::MusicOn | Cue::MusicOff => true,
    };
    if enabled {
        t.effects.push(Effect::Notify(cue));
    }
}

fn set_phase(t: &mut Transition, phase: Phase) {
    if t.state.phase != phase {
        info!("Phase: {} -> {}", t.state.phase.as_str(), phase.as_str());
    }
    t.state.phase = phase;
}

/// Fresh per-level state; shared by level select and advance.
fn enter_level(t: &mut Transition, index: usize) {
    let s = &mut t.state;
    s.current_level = Some(index);
    s.attempts = 0;
    s.feedback = Feedback::None;
    s.raw_input.clear();
    s.hint_visible = false;
    s.visit += 1;
    set_phase(t, Phase::Playing);
}

fn start(t: &mut Transition) {
    if t.state.phase != Phase::Home {
        return;
    }
    cue(t, Cue::Click);
    set_phase(t, Phase::LevelSelect);
}

fn select_level(t: &mut Transition, id: u32, catalog: &LevelCatalog) {
    if t.state.phase != Phase::LevelSelect {
        return;
    }
    if !t.state.is_unlocked(id) {
        debug!("Level {} is locked, ignoring select", id);
        return;
    }
    let Some(index) = catalog.find_by_id(id) else {
        return;
    };
    cue(t, Cue::Click);
    info!("Entering level {}", id);
    enter_level(t, index);
}

fn edit_input(t: &mut Transition, text: String) {
    if t.state.phase != Phase::Playing || t.state.feedback == Feedback::Correct {
        return;
    }
    t.state.raw_input = text;
}

fn submit(t: &mut Transition, catalog: &LevelCatalog, pacing: &Pacing) {
    if t.state.phase != Phase::Playing || t.state.feedback != Feedback::None {
        debug!("Submit ignored (feedback: {:?})", t.state.feedback);
        return;
    }
    let Some(level) = t.state.level(catalog) else {
        return;
    };

    match evaluator::evaluate(&t.state.raw_input, level.answer) {
        Evaluation::NotSubmittable => {}
        Evaluation::Correct => {
            let award = scoring::score(level.difficulty, t.state.attempts);
            let s = &mut t.state;
            s.feedback = Feedback::Correct;
            s.score = s.score.saturating_add(award);
            s.last_award = Some(award);
            info!(
                "Level {} solved after {} wrong attempt(s): +{} (total {})",
                level.id, s.attempts, award, s.score
            );
            t.effects.push(Effect::SaveScore(s.score));

            let next_id = level.id + 1;
            if next_id as usize <= catalog.count() && !s.unlocked.contains(&next_id) {
                s.unlocked.insert(next_id);
                info!("Unlocked level {}", next_id);
                t.effects.push(Effect::SaveUnlocked(s.unlocked.clone()));
            }

            cue(t, Cue::Success);
            t.effects.push(Effect::Schedule {
                after: pacing.correct_delay,
                timer: Timer::ShowSummary {
                    visit: t.state.visit,
                },
            });
        }
        Evaluation::Wrong => {
            let s = &mut t.state;
            s.feedback = Feedback::Wrong;
            s.attempts += 1;
            s.total_attempts += 1;
            debug!("Wrong answer on level {} (attempts: {})", level.id, s.attempts);

            cue(t, Cue::Error);
            cue(t, Cue::Vibrate { millis: VIBRATION_MS });
            t.effects.push(Effect::Schedule {
                after: pacing.wrong_delay,
                timer: Timer::ClearFeedback {
                    visit: t.state.visit,
                },
            });
        }
    }
}

fn show_hint(t: &mut Transition) {
    if t.state.phase != Phase::Playing || t.state.feedback == Feedback::Correct {
        return;
    }
    if !t.state.hint_visible {
        cue(t, Cue::Click);
        t.state.hint_visible = true;
    }
}

fn advance(t: &mut Transition, catalog: &LevelCatalog) {
    if t.state.phase != Phase::Summary {
        return;
    }
    cue(t, Cue::Click);
    match t.state.current_level {
        Some(idx) if idx + 1 < catalog.count() => enter_level(t, idx + 1),
        _ => {
            info!("Catalog finished");
            leave_level(t);
            set_phase(t, Phase::Home);
        }
    }
}

fn return_to_map(t: &mut Transition) {
    match t.state.phase {
        Phase::Summary => set_phase(t, Phase::LevelSelect),
        // Abandons the level; bumping the visit voids its pending timers.
        Phase::Playing => {
            leave_level(t);
            set_phase(t, Phase::LevelSelect);
        }
        Phase::Home | Phase::LevelSelect => {}
    }
}

fn leave_level(t: &mut Transition) {
    let s = &mut t.state;
    s.current_level = None;
    s.attempts = 0;
    s.feedback = Feedback::None;
    s.raw_input.clear();
    s.hint_visible = false;
    s.visit += 1;
}

fn go_home(t: &mut Transition) {
    leave_level(t);
    set_phase(t, Phase::Home);
}

fn reset_progress(t: &mut Transition) {
    info!("Resetting all progress");
    let settings = t.state.settings;
    let visit = t.state.visit + 1;
    set_phase(t, Phase::Home);
    t.state = SessionState {
        visit,
        ..SessionState::new(BTreeSet::from([FIRST_LEVEL_ID]), 0, settings)
    };
    t.effects.push(Effect::CancelTimers);
    t.effects.push(Effect::ClearProgress);
}

fn toggle_sound(t: &mut Transition) {
    let was_playing = t.state.settings.music_playing();
    t.state.settings.sound = !t.state.settings.sound;
    music_changed(t, was_playing);
}

fn toggle_music(t: &mut Transition) {
    let was_playing = t.state.settings.music_playing();
    t.state.settings.music = !t.state.settings.music;
    music_changed(t, was_playing);
}

fn music_changed(t: &mut Transition, was_playing: bool) {
    match (was_playing, t.state.settings.music_playing()) {
        (false, true) => cue(t, Cue::MusicOn),
        (true, false) => cue(t, Cue::MusicOff),
        _ => {}
    }
}

fn timer_elapsed(t: &mut Transition, timer: Timer) {
    let s = &t.state;
    match timer {
        Timer::ShowSummary { visit } => {
            if visit == s.visit && s.phase == Phase::Playing && s.feedback == Feedback::Correct {
                set_phase(t, Phase::Summary);
            } else {
                debug!("Stale summary timer (visit {}, now {})", visit, s.visit);
            }
        }
        Timer::ClearFeedback { visit } => {
            if visit == s.visit && s.phase == Phase::Playing && s.feedback == Feedback::Wrong {
                t.state.feedback = Feedback::None;
            } else {
                debug!("Stale feedback timer (visit {}, now {})", visit, s.visit);
            }
        }
    }
}
