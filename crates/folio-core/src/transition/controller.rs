//! Page-turn transition controller
//!
//! Drives one slide animation at a time. The host starts a session with
//! [`TransitionController::animate_transition`] and then calls
//! [`TransitionController::on_frame`] on every animation tick until it
//! reports [`FrameStatus::Completed`].

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{lerp, progress};
use crate::config::AnimationConfig;
use crate::render::{PageRenderer, PageStyle};
use crate::state::{Position, ReaderState};
use crate::surface::Surface;

/// Slide direction of a page turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Backwards: the old page leaves to the right
    Left,
    /// Forwards: the old page leaves to the left
    Right,
}

/// Direction of a turn from `from` to `to`.
///
/// A chapter change decides on its own; within a chapter the page index does.
pub fn infer_direction(from: Position, to: Position) -> Direction {
    let forward = if from.chapter_index != to.chapter_index {
        to.chapter_index > from.chapter_index
    } else {
        to.page_index > from.page_index
    };
    if forward {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// The running animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSession {
    pub direction: Direction,
    pub started_at: Instant,
    pub duration: Duration,
    pub from: Position,
    pub to: Position,
    /// Raw (uneased) progress of the last frame
    pub progress: f64,
}

/// Outcome of one animation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// No session was running
    Idle,
    /// A frame was drawn; `progress` is the eased value
    Running { progress: f64 },
    /// The final page was drawn and the session ended
    Completed,
}

#[derive(Debug)]
pub struct TransitionController<S: Surface> {
    session: Option<AnimationSession>,
    /// Offscreen buffer both pages are composited into
    frame: Option<S>,
    enabled: bool,
    duration: Duration,
    easing: EasingType,
    /// Chapter shown by the last transition or direct draw
    cached_chapter: usize,
    progress: f64,
}

impl<S: Surface> Default for TransitionController<S> {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl<S: Surface> TransitionController<S> {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            session: None,
            frame: None,
            enabled: config.enabled,
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing,
            cached_chapter: 0,
            progress: 0.0,
        }
    }

    /// Whether a session is running
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the host should keep delivering frames at animation rate
    #[inline]
    pub fn needs_frame(&self) -> bool {
        self.session.is_some()
    }

    /// Eased progress of the last frame, 0 when idle
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn cached_chapter(&self) -> usize {
        self.cached_chapter
    }

    /// Record the chapter currently on screen after a direct draw
    pub fn set_cached_chapter(&mut self, chapter_index: usize) {
        self.cached_chapter = chapter_index;
    }

    /// Start a slide from `from` to `to`.
    ///
    /// Returns `false` without side effects when another turn is running,
    /// animations are disabled, the live surface is missing or either chapter
    /// has not been split yet. The caller then draws the target directly.
    fn animate(&mut self, state: &mut ReaderState, from: Position, to: Position, live: Option<&S>, now: Instant) -> bool {
        if state.is_animating || self.session.is_some() {
            warn!("Page turn to {}:{} refused: animation in progress", to.chapter_index, to.page_index);
            return false;
        }
        if !self.enabled {
            return false;
        }
        let Some(live) = live else {
            debug!("Page turn not animated: surface unavailable");
            return false;
        };
        let split = |index: usize| {
            state
                .chapters
                .get(index)
                .is_some_and(|c| c.cached_pages().is_some())
        };
        if !split(from.chapter_index) || !split(to.chapter_index) {
            debug!("Page turn not animated: chapter not split");
            return false;
        }

        let direction = infer_direction(from, to);
        debug!(
            "Animating {:?} from {}:{} to {}:{} over {:?}",
            direction, from.chapter_index, from.page_index, to.chapter_index, to.page_index, self.duration
        );

        self.frame = match self.frame.take() {
            Some(frame) if frame.same_size(live) => Some(frame),
            _ => Some(live.create_scratch()),
        };
        self.session = Some(AnimationSession {
            direction,
            started_at: now,
            duration: self.duration,
            from,
            to,
            progress: 0.0,
        });
        self.progress = 0.0;
        self.cached_chapter = to.chapter_index;
        state.is_animating = true;
        true
    }

    /// Animate from `old_page` of the chapter last shown to `new_page` of the
    /// current chapter. Page indices count screens.
    ///
    /// When the turn is refused the caller draws the new page directly; the
    /// current chapter is then remembered as shown.
    pub fn animate_transition(
        &mut self,
        state: &mut ReaderState,
        old_page: usize,
        new_page: usize,
        live: Option<&S>,
        now: Instant,
    ) -> bool {
        let from = Position::new(self.cached_chapter, old_page);
        let to = Position::new(state.position.chapter_index, new_page);
        let started = self.animate(state, from, to, live, now);
        if !started && !self.is_animating() {
            self.cached_chapter = to.chapter_index;
        }
        started
    }

    /// Advance the running session to `now` and draw one frame.
    pub fn on_frame(
        &mut self,
        now: Instant,
        state: &mut ReaderState,
        renderer: &mut PageRenderer<S>,
        live: Option<&mut S>,
        style: &PageStyle,
    ) -> FrameStatus {
        let Some(session) = self.session.as_mut() else {
            return FrameStatus::Idle;
        };

        let raw = progress(session.started_at, now, session.duration);
        session.progress = raw;
        let (direction, from, to) = (session.direction, session.from, session.to);

        let old_pages = state.chapters.get(from.chapter_index).and_then(|c| c.cached_pages());
        let new_pages = state.chapters.get(to.chapter_index).and_then(|c| c.cached_pages());

        match (raw < 1.0, old_pages, new_pages, live) {
            (true, Some(old_pages), Some(new_pages), Some(live)) => {
                let eased = self.easing.apply(raw);
                let width = live.width();
                let (old_x, new_x) = match direction {
                    Direction::Right => (lerp(0.0, -width, eased), lerp(width, 0.0, eased)),
                    Direction::Left => (lerp(0.0, width, eased), lerp(-width, 0.0, eased)),
                };

                let mut frame = match self.frame.take() {
                    Some(frame) if frame.same_size(live) => frame,
                    _ => live.create_scratch(),
                };
                frame.clear();
                renderer.draw_offset_page(&mut frame, old_pages, from.page_index, old_x, style);
                renderer.draw_offset_page(&mut frame, new_pages, to.page_index, new_x, style);

                live.clear();
                live.draw_surface(&frame, 0.0);
                self.frame = Some(frame);
                self.progress = eased;
                FrameStatus::Running { progress: eased }
            }
            (_, _, new_pages, live) => {
                // Final frame, also reached when pages or the surface went away
                match new_pages {
                    Some(pages) => renderer.draw_page(live, pages, to.page_index, style),
                    None => warn!("Chapter {} has no pages at end of page turn", to.chapter_index),
                }
                debug!("Page turn to {}:{} complete", to.chapter_index, to.page_index);
                self.session = None;
                self.progress = 0.0;
                state.is_animating = false;
                FrameStatus::Completed
            }
        }
    }
}
