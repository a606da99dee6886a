//! Canvas confetti burst for a winning reveal. Particles are spawned in one
//! upward fan, advanced per animation frame, and aged out; the page's rAF
//! loop owns stepping and rendering.

use web_sys::CanvasRenderingContext2d;

/// Palette of the celebration burst.
const COLORS: [&str; 4] = ["#D946EF", "#8B5CF6", "#06B6D4", "#FFFFFF"];

/// Particle lifetime in milliseconds before it is retired.
const LIFETIME_MS: f64 = 2200.0;

const PARTICLES_PER_BURST: usize = 200;

pub struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    size: f64,
    rot: f64,
    vrot: f64,
    color: &'static str,
    born_ms: f64,
}

/// Small congruential generator for visual jitter. Confetti does not need
/// the unbiased entropy the draw uses; a fast deterministic stream is enough.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Fire one burst from just below screen center: an upward fan roughly 120°
/// wide, mixed speeds and spins.
pub fn spawn_burst(particles: &mut Vec<Particle>, width: f64, height: f64, now: f64) {
    let mut rng = Lcg::new((now as u64) ^ 0x9E37_79B9_7F4A_7C15);
    let origin_x = width * 0.5;
    let origin_y = height * 0.6;
    for _ in 0..PARTICLES_PER_BURST {
        // Straight up ± 60°.
        let angle = -std::f64::consts::FRAC_PI_2
            + (rng.next_f64() - 0.5) * (120f64).to_radians();
        let speed = 5.0 + rng.next_f64() * 9.0;
        let color_idx = (rng.next_f64() * COLORS.len() as f64) as usize % COLORS.len();
        particles.push(Particle {
            x: origin_x,
            y: origin_y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            size: 6.0 + rng.next_f64() * 8.0,
            rot: rng.next_f64() * std::f64::consts::TAU,
            vrot: (rng.next_f64() - 0.5) * 0.4,
            color: COLORS[color_idx],
            born_ms: now,
        });
    }
}

/// Advance and draw all live particles, retiring expired ones. Physics is
/// per-frame (gravity pull, slight drag) like the rest of the page's visual
/// effects.
pub fn step_and_render(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    particles: &mut Vec<Particle>,
    now: f64,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    particles.retain(|p| now - p.born_ms < LIFETIME_MS);
    for p in particles.iter_mut() {
        p.vy += 0.22;
        p.vx *= 0.99;
        p.x += p.vx;
        p.y += p.vy;
        p.rot += p.vrot;

        let alpha = 1.0 - ((now - p.born_ms) / LIFETIME_MS).clamp(0.0, 1.0);
        ctx.save();
        ctx.translate(p.x, p.y).ok();
        ctx.rotate(p.rot).ok();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(p.color);
        ctx.fill_rect(-p.size / 2.0, -p.size / 2.0, p.size, p.size * 0.6);
        ctx.restore();
    }
    ctx.set_global_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = Lcg::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn burst_spawns_upward_fan() {
        let mut particles = Vec::new();
        spawn_burst(&mut particles, 800.0, 600.0, 1234.5);
        assert_eq!(particles.len(), PARTICLES_PER_BURST);
        // Everything starts at the origin point and moves up initially.
        for p in &particles {
            assert_eq!((p.x, p.y), (400.0, 360.0));
            assert!(p.vy < 0.0, "initial vertical velocity must point up");
        }
    }
}
