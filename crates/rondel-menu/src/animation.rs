//! Reveal and conceal animations as resumable tasks.
//!
//! Each task does its entry work when it is created and advances by one step per tick. The
//! [`Animator`] keeps at most one task alive; starting another drops the first.

use crate::ring::SlotRing;
use crate::settings::MenuSettings;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnimationState {
    Idle,
    Revealing,
    Concealing,
}

/// Overlay that wipes the ring in while revealing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotsMask {
    pub active: bool,
    /// `1.0` covers the whole ring, `0.0` uncovers it.
    pub fill_amount: f32,
}

impl Default for SlotsMask {
    fn default() -> Self {
        Self {
            active: false,
            fill_amount: 1.0,
        }
    }
}

/// What a task is allowed to touch while it runs.
pub struct AnimationContext<'a> {
    pub ring: &'a mut SlotRing,
    pub mask: &'a mut SlotsMask,
    /// Slots below this index carry an action.
    pub bound: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RevealPhase {
    Rotate,
    Unmask,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    phase: RevealPhase,
    progress: f32,
    rotate_speed: f32,
    unmask_speed: f32,
}

impl Reveal {
    /// Activates the mask and closes it fully. Slots must already be bound.
    pub fn begin(mask: &mut SlotsMask, settings: &MenuSettings) -> Self {
        mask.active = true;
        mask.fill_amount = 1.0;
        Self {
            phase: RevealPhase::Rotate,
            progress: 0.0,
            rotate_speed: settings.reveal_speed,
            unmask_speed: settings.unmask_speed,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    fn step(&mut self, dt: f32, ctx: AnimationContext<'_>) -> TaskStatus {
        match self.phase {
            RevealPhase::Rotate => {
                self.progress += dt * self.rotate_speed;
                let eased = self.progress * self.progress;

                for (i, slot) in ctx.ring.iter_mut().enumerate() {
                    if i < ctx.bound {
                        slot.show();
                        slot.sweep(eased);
                    } else {
                        slot.hide();
                    }
                }

                if self.progress >= 1.0 {
                    self.phase = RevealPhase::Unmask;
                    self.progress = 0.0;
                }
                TaskStatus::Running
            }
            RevealPhase::Unmask => {
                self.progress += dt * self.unmask_speed;
                ctx.mask.fill_amount = lerp(ctx.mask.fill_amount, 0.0, self.progress);

                if self.progress >= 1.0 {
                    TaskStatus::Complete
                } else {
                    TaskStatus::Running
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conceal {
    progress: f32,
    speed: f32,
}

impl Conceal {
    /// Hides every slot and closes the mask. Returns `None` when the mask is not active, in
    /// which case there is nothing on screen to sweep away.
    pub fn begin(ctx: AnimationContext<'_>, settings: &MenuSettings) -> Option<Self> {
        if !ctx.mask.active {
            return None;
        }

        ctx.mask.fill_amount = 1.0;
        ctx.ring.hide_all();

        Some(Self {
            progress: 1.0,
            speed: settings.conceal_speed,
        })
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    fn step(&mut self, dt: f32, ctx: AnimationContext<'_>) -> TaskStatus {
        self.progress -= dt * self.speed;

        for slot in ctx.ring.iter_mut() {
            slot.sweep(self.progress);
        }

        if self.progress <= 0.0 {
            ctx.mask.active = false;
            TaskStatus::Complete
        } else {
            TaskStatus::Running
        }
    }
}

#[derive(Debug, Clone)]
pub enum Animation {
    Reveal(Reveal),
    Conceal(Conceal),
}

impl Animation {
    pub fn state(&self) -> AnimationState {
        match self {
            Self::Reveal(_) => AnimationState::Revealing,
            Self::Conceal(_) => AnimationState::Concealing,
        }
    }

    fn step(&mut self, dt: f32, ctx: AnimationContext<'_>) -> TaskStatus {
        match self {
            Self::Reveal(task) => task.step(dt, ctx),
            Self::Conceal(task) => task.step(dt, ctx),
        }
    }
}

/// Runs the single in-flight animation, once per tick.
#[derive(Debug, Default)]
pub struct Animator {
    active: Option<Animation>,
}

impl Animator {
    pub fn start(&mut self, animation: Animation) {
        self.cancel();
        log::debug!("Radial menu animation started: {}", animation.state());
        self.active = Some(animation);
    }

    /// Stops the in-flight animation where it is.
    pub fn cancel(&mut self) {
        if let Some(animation) = self.active.take() {
            log::debug!("Radial menu animation cancelled: {}", animation.state());
        }
    }

    pub fn state(&self) -> AnimationState {
        self.active
            .as_ref()
            .map_or(AnimationState::Idle, Animation::state)
    }

    pub fn active(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    /// Advances the in-flight animation by `dt` seconds of unscaled time. Returns the state of
    /// the animation that completed on this tick, if any.
    pub fn tick(&mut self, dt: f32, ctx: AnimationContext<'_>) -> Option<AnimationState> {
        let animation = self.active.as_mut()?;
        let dt = dt.max(0.0);

        match animation.step(dt, ctx) {
            TaskStatus::Running => None,
            TaskStatus::Complete => {
                let state = animation.state();
                self.active = None;
                log::debug!("Radial menu animation complete: {}", state);
                Some(state)
            }
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
