//! Frame-driven animation primitives
//!
//! Everything here is advanced by the event loop's frame tick; nothing owns
//! a timer. A [`Tween`] always animates from wherever it currently is, so
//! retargeting mid-flight never jumps.

use std::collections::HashMap;
use std::time::Duration;

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to [0, 1]) onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Animation controller for a single scalar
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    value: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(value: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    /// Retarget from the current value. Same target again is a no-op.
    pub fn start(&mut self, target: f32) {
        if (target - self.to).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = Duration::ZERO;
        if self.duration.is_zero() {
            self.value = target;
        }
    }

    /// Advance by one frame
    pub fn tick(&mut self, dt: Duration) {
        if self.is_settled() {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        self.value = self.from + (self.to - self.from) * self.easing.apply(progress);
        if self.elapsed >= self.duration {
            self.value = self.to;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration || (self.value - self.to).abs() < f32::EPSILON
    }
}

/// Fixed keyframe sequence sampled over a duration
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    frames: Vec<f32>,
    duration: Duration,
    elapsed: Option<Duration>,
}

impl Keyframes {
    pub fn new(frames: Vec<f32>, duration: Duration) -> Self {
        Self {
            frames,
            duration,
            elapsed: None,
        }
    }

    /// Start (or restart) playback
    pub fn play(&mut self) {
        self.elapsed = Some(Duration::ZERO);
    }

    pub fn is_playing(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(elapsed) = self.elapsed {
            let next = elapsed + dt;
            self.elapsed = (next < self.duration).then_some(next);
        }
    }

    /// Current value; the last frame once finished or never started
    pub fn value(&self) -> f32 {
        let last = self.frames.last().copied().unwrap_or(1.0);
        let Some(elapsed) = self.elapsed else {
            return last;
        };
        if self.frames.len() < 2 || self.duration.is_zero() {
            return last;
        }

        let segments = (self.frames.len() - 1) as f32;
        let pos = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0) * segments;
        let idx = (pos.floor() as usize).min(self.frames.len() - 2);
        let local = pos - idx as f32;
        self.frames[idx] + (self.frames[idx + 1] - self.frames[idx]) * local
    }
}

/// Animations shared by id, so one element can appear to move between places
#[derive(Debug, Clone, Default)]
pub struct SharedLayout {
    entries: HashMap<&'static str, Tween>,
    duration: Duration,
    easing: Easing,
}

impl SharedLayout {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            entries: HashMap::new(),
            duration,
            easing,
        }
    }

    /// Place `id` at `x`: first placement snaps, later ones glide
    pub fn place(&mut self, id: &'static str, x: f32) -> &Tween {
        let (duration, easing) = (self.duration, self.easing);
        let tween = self
            .entries
            .entry(id)
            .or_insert_with(|| Tween::new(x, duration, easing));
        tween.start(x);
        tween
    }

    /// Forget `id` (its element is no longer rendered anywhere)
    pub fn remove(&mut self, id: &'static str) {
        self.entries.remove(id);
    }

    pub fn get(&self, id: &'static str) -> Option<&Tween> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tick(&mut self, dt: Duration) {
        for tween in self.entries.values_mut() {
            tween.tick(dt);
        }
    }
}
