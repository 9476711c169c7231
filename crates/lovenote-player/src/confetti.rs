//! Terminal confetti.
//!
//! `celebrate` only queues particles; the render loop asks for the current
//! [`Spark`]s once per frame, which advances the simulation and drops
//! particles whose lifetime has ended.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, TAU};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lovenote_core::effects::{Intensity, Origin, ParticleEffect};
use lovenote_core::rng::DeterministicRng;
use lovenote_reveal::domain::artwork::Rgb;
use tracing::debug;

const GRAVITY: f64 = 0.45;
const MAX_PARTICLES: usize = 600;

const FIREWORKS_DURATION: Duration = Duration::from_secs(15);
const FIREWORKS_INTERVAL: Duration = Duration::from_millis(250);
const FIREWORKS_PER_SIDE: f64 = 24.0;

/// Shape of one burst: how many particles, how long they live, the cone they
/// leave in (centred on straight up) and their speed range in screens per
/// second.
#[derive(Debug, Clone, Copy)]
struct Spray {
    count: usize,
    life: Duration,
    spread: f64,
    speed: (f64, f64),
}

const SPARKLE: Spray = Spray {
    count: 30,
    life: Duration::from_millis(1200),
    spread: FRAC_PI_3,
    speed: (0.35, 0.7),
};

const FIREWORKS_OPENING: Spray = Spray {
    count: 60,
    life: Duration::from_millis(2000),
    spread: TAU,
    speed: (0.25, 0.5),
};

const FIREWORKS_SIDE: Spray = Spray {
    count: 0,
    life: Duration::from_millis(2000),
    spread: TAU,
    speed: (0.2, 0.45),
};

const GLYPHS: [char; 5] = ['*', '+', '•', '✦', '♥'];
const COLORS: [Rgb; 5] = [
    Rgb::hex(0x00FF_69B4),
    Rgb::hex(0x00FF_1493),
    Rgb::hex(0x00FF_D700),
    Rgb::hex(0x00FF_FFFF),
    Rgb::hex(0x00DC_143C),
];

/// One particle ready to draw, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spark {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Character to print.
    pub glyph: char,
    /// Foreground colour.
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    origin: Origin,
    vx: f64,
    vy: f64,
    born: Instant,
    life: Duration,
    glyph: char,
    color: Rgb,
}

impl Particle {
    fn position(&self, now: Instant) -> Origin {
        let t = now.saturating_duration_since(self.born).as_secs_f64();
        Origin {
            x: self.vx.mul_add(t, self.origin.x),
            y: (0.5 * GRAVITY * t).mul_add(t, self.vy.mul_add(t, self.origin.y)),
        }
    }

    fn alive(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.born) < self.life
    }
}

#[derive(Debug, Clone, Copy)]
struct Show {
    started: Instant,
    next_emit: Instant,
}

struct ConfettiState {
    particles: Vec<Particle>,
    shows: Vec<Show>,
    rng: Box<dyn DeterministicRng>,
}

impl ConfettiState {
    fn burst(&mut self, spray: Spray, origin: Origin, now: Instant) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..spray.count.min(room) {
            let angle = (self.rng.next_f64() - 0.5).mul_add(spray.spread, FRAC_PI_2);
            let (slowest, fastest) = spray.speed;
            let speed = self.rng.next_f64().mul_add(fastest - slowest, slowest);
            let glyph = GLYPHS[self.pick(GLYPHS.len())];
            let color = COLORS[self.pick(COLORS.len())];
            self.particles.push(Particle {
                origin,
                vx: angle.cos() * speed,
                vy: -angle.sin() * speed,
                born: now,
                life: spray.life,
                glyph,
                color,
            });
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        let max = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        usize::try_from(self.rng.next_u32_range(0, max)).unwrap_or(0)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn run_shows(&mut self, now: Instant) {
        let mut shows = std::mem::take(&mut self.shows);
        for show in &mut shows {
            let end = show.started + FIREWORKS_DURATION;
            while show.next_emit <= now && show.next_emit < end {
                let left = end.saturating_duration_since(show.next_emit).as_secs_f64()
                    / FIREWORKS_DURATION.as_secs_f64();
                let side = Spray {
                    count: (FIREWORKS_PER_SIDE * left).ceil() as usize,
                    ..FIREWORKS_SIDE
                };
                let at = show.next_emit;
                let left_origin = Origin {
                    x: self.rng.next_f64().mul_add(0.2, 0.1),
                    y: self.rng.next_f64().mul_add(0.4, 0.1),
                };
                let right_origin = Origin {
                    x: self.rng.next_f64().mul_add(0.2, 0.7),
                    y: self.rng.next_f64().mul_add(0.4, 0.1),
                };
                self.burst(side, left_origin, at);
                self.burst(side, right_origin, at);
                show.next_emit += FIREWORKS_INTERVAL;
            }
        }
        shows.retain(|show| show.next_emit < show.started + FIREWORKS_DURATION);
        self.shows = shows;
    }
}

/// Particle effect drawn by the terminal renderer.
pub struct TerminalConfetti {
    state: Mutex<ConfettiState>,
}

impl TerminalConfetti {
    /// Creates an empty effect that draws particle directions from `rng`.
    #[must_use]
    pub fn new(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            state: Mutex::new(ConfettiState {
                particles: Vec::new(),
                shows: Vec::new(),
                rng,
            }),
        }
    }

    /// Queues a celebration starting at `now`.
    pub fn celebrate_at(&self, intensity: Intensity, origin: Origin, now: Instant) {
        let mut state = self.lock();
        match intensity {
            Intensity::Sparkle => state.burst(SPARKLE, origin, now),
            Intensity::Fireworks => {
                state.burst(FIREWORKS_OPENING, origin, now);
                state.shows.push(Show {
                    started: now,
                    next_emit: now,
                });
            }
        }
        debug!(?intensity, particles = state.particles.len(), "celebration queued");
    }

    /// Advances the simulation to `now` and returns every visible particle
    /// on a `width` × `height` screen.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sparks(&self, now: Instant, width: u16, height: u16) -> Vec<Spark> {
        let mut state = self.lock();
        state.particles.retain(|particle| particle.alive(now));
        state.run_shows(now);
        state.particles.retain(|particle| particle.alive(now));

        state
            .particles
            .iter()
            .filter_map(|particle| {
                let at = particle.position(now);
                if !(0.0..1.0).contains(&at.x) || !(0.0..1.0).contains(&at.y) {
                    return None;
                }
                Some(Spark {
                    x: (at.x * f64::from(width)) as u16,
                    y: (at.y * f64::from(height)) as u16,
                    glyph: particle.glyph,
                    color: particle.color,
                })
            })
            .collect()
    }

    /// Whether anything is still in the air or scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let state = self.lock();
        !state.particles.is_empty() || !state.shows.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ConfettiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParticleEffect for TerminalConfetti {
    fn celebrate(&self, intensity: Intensity, origin: Origin) {
        self.celebrate_at(intensity, origin, Instant::now());
    }
}
