//! Direct-sum N-body integration
//!
//! O(n²) force evaluation per step. Velocities are updated body by body from
//! the current positions, then all positions advance together.

use rand::Rng;

/// Gravitational constant used by default
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Softening term added to r² so coincident bodies do not divide by zero
const SOFTENING: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub mass: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    bodies: Vec<Body>,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// Positions in `[-500, 500)`, velocities in `[-5, 5)`, mass in `[1, 101)`
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let bodies = (0..n)
            .map(|_| Body {
                x: rng.gen::<f64>() * 1000.0 - 500.0,
                y: rng.gen::<f64>() * 1000.0 - 500.0,
                z: rng.gen::<f64>() * 1000.0 - 500.0,
                vx: rng.gen::<f64>() * 10.0 - 5.0,
                vy: rng.gen::<f64>() * 10.0 - 5.0,
                vz: rng.gen::<f64>() * 10.0 - 5.0,
                mass: rng.gen::<f64>() * 100.0 + 1.0,
            })
            .collect();
        Self { bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advance one time step of length `dt`
    pub fn step(&mut self, dt: f64, g: f64) {
        let n = self.bodies.len();

        for i in 0..n {
            let bi = self.bodies[i];
            let (mut fx, mut fy, mut fz) = (0.0, 0.0, 0.0);

            for (j, bj) in self.bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = bj.x - bi.x;
                let dy = bj.y - bi.y;
                let dz = bj.z - bi.z;
                let r2 = dx * dx + dy * dy + dz * dz + SOFTENING;
                let r = r2.sqrt();
                let f = g * bi.mass * bj.mass / r2;

                fx += f * dx / r;
                fy += f * dy / r;
                fz += f * dz / r;
            }

            let body = &mut self.bodies[i];
            body.vx += fx / body.mass * dt;
            body.vy += fy / body.mass * dt;
            body.vz += fz / body.mass * dt;
        }

        for body in self.bodies.iter_mut() {
            body.x += body.vx * dt;
            body.y += body.vy * dt;
            body.z += body.vz * dt;
        }
    }

    /// Run `steps` steps
    pub fn run(&mut self, steps: usize, dt: f64, g: f64) {
        for _ in 0..steps {
            self.step(dt, g);
        }
    }

    /// Total momentum `(px, py, pz)`
    pub fn momentum(&self) -> (f64, f64, f64) {
        self.bodies.iter().fold((0.0, 0.0, 0.0), |(px, py, pz), b| {
            (px + b.mass * b.vx, py + b.mass * b.vy, pz + b.mass * b.vz)
        })
    }
}
