//! Frame-by-frame simulation driver
//!
//! Each bouncing frame runs a fixed number of physics sub-steps, checking the
//! wall on every one. Once the termination policy (or the frame cap) ends the
//! bounce phase, the whole return glide is emitted in a single step.

use glam::Vec2;
use rand::Rng;

use super::collision::{crosses_boundary, sprite_boundary_collision};
use super::geometry::{Boundary, sprite_center};
use super::policy::should_return;
use super::reflect::reflect_off_boundary;
use super::return_path::ReturnPath;
use super::state::{Phase, PositionLog, SimState, Termination, Trajectory};
use crate::error::ReelResult;
use crate::settings::ReelConfig;

/// Owns the simulation state and its random source
pub struct Simulator<R: Rng> {
    config: ReelConfig,
    boundary: Boundary,
    state: SimState,
    rng: R,
    log: PositionLog,
    bounce_frames: u32,
    return_steps: u32,
    termination: Option<Termination>,
}

impl<R: Rng> Simulator<R> {
    /// Validate `config` and launch the sprite from the canvas center
    ///
    /// `rng` supplies the initial direction and every reflection jitter; seed
    /// it for reproducible runs.
    pub fn new(config: &ReelConfig, mut rng: R) -> ReelResult<Self> {
        config.validate()?;
        let state = SimState::launch(config, &mut rng);
        log::debug!(
            "Launch at ({:.1}, {:.1}) with velocity ({:.3}, {:.3})",
            state.position.x,
            state.position.y,
            state.velocity.x,
            state.velocity.y
        );
        Ok(Self {
            config: config.clone(),
            boundary: Boundary::from_config(config),
            state,
            rng,
            log: PositionLog::new(),
            bounce_frames: 0,
            return_steps: 0,
            termination: None,
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn positions(&self) -> &PositionLog {
        &self.log
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Advance by one rendered frame and report the resulting phase
    pub fn step_frame(&mut self) -> Phase {
        match self.state.phase {
            Phase::Bouncing => self.bounce_frame(),
            Phase::Returning => self.glide_home(),
            Phase::Done => {}
        }
        self.state.phase
    }

    /// Run to completion
    pub fn run(mut self) -> Trajectory {
        while self.step_frame() != Phase::Done {}

        log::info!(
            "Simulated {} bounces over {} frames, {} return frames",
            self.state.bounce_count,
            self.bounce_frames,
            self.return_steps
        );

        Trajectory {
            positions: self.log,
            bounce_count: self.state.bounce_count,
            bounce_frames: self.bounce_frames,
            return_steps: self.return_steps,
            // Done is only reachable after a recorded termination
            termination: self.termination.unwrap_or(Termination::Forced),
        }
    }

    fn bounce_frame(&mut self) {
        for _ in 0..self.config.sub_steps_per_frame {
            self.sub_step();
        }
        self.log.push(self.state.position);
        self.bounce_frames += 1;

        let center = sprite_center(self.state.position, self.config.sprite_half());
        if should_return(
            self.state.bounce_count,
            self.config.required_bounces,
            center,
            self.state.velocity,
            &self.boundary,
        ) {
            self.end_bouncing(Termination::Aligned);
        } else if self.bounce_frames >= self.config.max_bounce_frames {
            log::warn!(
                "No return alignment after {} frames ({} bounces), forcing return",
                self.bounce_frames,
                self.state.bounce_count
            );
            self.aim_home(center);
            self.end_bouncing(Termination::Forced);
        }
    }

    fn sub_step(&mut self) {
        let steps = self.config.sub_steps_per_frame as f32;
        let half = self.config.sprite_half();
        let state = &mut self.state;

        let mut next = state.position + state.velocity / steps;
        let hit = sprite_boundary_collision(sprite_center(next, half), half, &self.boundary);

        // Only an outward-moving crossing is a bounce; after an overshoot the
        // sprite is already heading back in.
        if hit.hit && state.velocity.dot(hit.normal) > 0.0 {
            state.velocity = reflect_off_boundary(
                state.velocity,
                hit.normal,
                self.config.jitter_degrees,
                self.config.speed,
                &mut self.rng,
            );
            state.bounce_count += 1;
            log::debug!(
                "Bounce {} at frame {} (penetration {:.3})",
                state.bounce_count,
                self.bounce_frames,
                hit.penetration
            );
            next = state.position + state.velocity / steps;

            // A long sub-step can still carry the sprite out along the curve;
            // never end a sub-step farther outside than it started.
            let start_center = sprite_center(state.position, half);
            let next_center = sprite_center(next, half);
            if crosses_boundary(next_center, half, &self.boundary)
                && next_center.distance(self.boundary.center)
                    > start_center.distance(self.boundary.center)
            {
                next = state.position;
            }
        }

        state.position = next;
    }

    /// Turn the velocity toward the center so a forced glide starts smoothly
    fn aim_home(&mut self, center: Vec2) {
        if let Some(dir) = self.boundary.direction_to_center(center) {
            self.state.velocity = dir * self.config.speed;
        }
    }

    fn end_bouncing(&mut self, termination: Termination) {
        log::debug!(
            "Bouncing -> Returning after {} frames ({:?})",
            self.bounce_frames,
            termination
        );
        self.termination = Some(termination);
        self.state.advance_phase();
    }

    fn glide_home(&mut self) {
        let center = sprite_center(self.state.position, self.config.sprite_half());
        let path = ReturnPath::plan(
            center,
            self.boundary.center,
            self.config.sub_step_distance(),
            self.config.return_min_steps,
            self.config.return_max_steps,
        );

        for position in path.positions(self.state.position) {
            self.log.push(position);
        }
        if let Some(last) = self.log.last() {
            self.state.position = last;
        }
        self.return_steps = path.steps;
        log::debug!("Returning -> Done after {} glide frames", path.steps);
        self.state.advance_phase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RETURN_ALIGNMENT;
    use crate::sim::policy::center_alignment;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_config() -> ReelConfig {
        ReelConfig {
            canvas_size: 96,
            circle_diameter: 80,
            sprite_size: 16,
            speed: 3.0,
            ..Default::default()
        }
    }

    fn simulator(config: &ReelConfig, seed: u64) -> Simulator<Pcg32> {
        Simulator::new(config, Pcg32::seed_from_u64(seed)).unwrap()
    }

    fn bounce_margin(config: &ReelConfig, position: Vec2, boundary: &Boundary) -> f32 {
        let center = sprite_center(position, config.sprite_half());
        center.distance(boundary.center) + config.sprite_half() - boundary.radius
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ReelConfig {
            sub_steps_per_frame: 0,
            ..Default::default()
        };
        assert!(Simulator::new(&config, Pcg32::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_reference_scenario_is_reproducible() {
        let config = ReelConfig::default();
        let first = simulator(&config, 2024).run();
        let second = simulator(&config, 2024).run();

        assert_eq!(first.bounce_count, second.bounce_count);
        assert_eq!(first.positions.len(), second.positions.len());
        assert_eq!(first.return_steps, second.return_steps);
        assert_eq!(first, second);
        assert!(first.bounce_count >= config.required_bounces);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let config = small_config();
        let a = simulator(&config, 1).run();
        let b = simulator(&config, 2).run();
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn test_phases_advance_in_order() {
        let config = small_config();
        let mut sim = simulator(&config, 77);
        let mut seen = vec![Phase::Bouncing];
        loop {
            let phase = sim.step_frame();
            if *seen.last().unwrap() != phase {
                seen.push(phase);
            }
            if phase == Phase::Done {
                break;
            }
        }
        assert_eq!(seen, vec![Phase::Bouncing, Phase::Returning, Phase::Done]);

        // Done is terminal and emits nothing further
        let len = sim.positions().len();
        assert_eq!(sim.step_frame(), Phase::Done);
        assert_eq!(sim.positions().len(), len);
    }

    #[test]
    fn test_speed_constant_while_bouncing() {
        let config = small_config();
        let mut sim = simulator(&config, 5);
        while sim.state().phase == Phase::Bouncing {
            assert!((sim.state().velocity.length() - config.speed).abs() < 1e-4);
            sim.step_frame();
        }
    }

    #[test]
    fn test_bounces_only_near_the_wall() {
        let config = small_config();
        let mut sim = simulator(&config, 11);
        let mut count = 0;
        while sim.state().phase == Phase::Bouncing {
            sim.step_frame();
            let now = sim.state().bounce_count;
            assert!(now >= count);
            if now > count {
                // A bounce this frame means the sprite reached the wall within
                // one frame's travel (plus the sub-step that detected it).
                let margin = bounce_margin(&config, sim.state().position, sim.boundary());
                let reach = config.speed + config.sub_step_distance() + 1e-3;
                assert!(margin > -reach, "bounced far from wall: {}", margin);
            }
            count = now;
        }
    }

    #[test]
    fn test_frame_cap_forces_return() {
        let config = ReelConfig {
            required_bounces: u32::MAX,
            max_bounce_frames: 40,
            ..small_config()
        };
        let trajectory = simulator(&config, 3).run();
        assert_eq!(trajectory.termination, Termination::Forced);
        assert_eq!(trajectory.bounce_frames, 40);

        let mut sim = simulator(&config, 3);
        while sim.step_frame() == Phase::Bouncing {}
        let state = sim.state();
        let center = sprite_center(state.position, config.sprite_half());
        let cos = center_alignment(center, state.velocity, sim.boundary()).unwrap();
        assert!(cos > 0.999, "forced return not re-aimed: {}", cos);
        assert!((state.velocity.length() - config.speed).abs() < 1e-4);
        assert_eq!(
            trajectory.positions.len(),
            (trajectory.bounce_frames + trajectory.return_steps) as usize
        );
    }

    #[test]
    fn test_reference_config_finishes_within_cap() {
        let config = ReelConfig::default();
        let max_frames = (config.max_bounce_frames + config.return_max_steps) as usize;
        for seed in 0..40 {
            let trajectory = simulator(&config, seed).run();
            assert!(trajectory.bounce_frames <= config.max_bounce_frames);
            assert!(trajectory.positions.len() <= max_frames);
        }
    }

    #[test]
    fn test_long_sub_steps_stay_inside() {
        let config = ReelConfig {
            speed: 200.0,
            sub_steps_per_frame: 1,
            ..Default::default()
        };
        for seed in 0..30 {
            let sim = simulator(&config, seed);
            let boundary = *sim.boundary();
            let trajectory = sim.run();
            for &position in trajectory.bounce_positions() {
                let margin = bounce_margin(&config, position, &boundary);
                assert!(margin <= 0.05, "seed {} escaped by {}", seed, margin);
            }
        }
    }

    #[test]
    fn test_return_glide_ends_centered() {
        let config = small_config();
        let trajectory = simulator(&config, 19).run();
        let last = trajectory.positions.last().unwrap();
        let center = sprite_center(last, config.sprite_half());
        assert!((center - config.canvas_center()).length() < 1e-2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_sprite_stays_inside(seed in any::<u64>()) {
            let config = small_config();
            let sim = simulator(&config, seed);
            let boundary = *sim.boundary();
            let trajectory = sim.run();
            for &position in trajectory.bounce_positions() {
                prop_assert!(bounce_margin(&config, position, &boundary) <= 0.05);
            }
        }

        #[test]
        fn prop_termination_respects_policy(seed in any::<u64>()) {
            let config = small_config();
            let mut sim = simulator(&config, seed);
            while sim.step_frame() == Phase::Bouncing {}

            let state = sim.state().clone();
            prop_assert_eq!(state.phase, Phase::Returning);
            if sim.termination() == Some(Termination::Aligned) {
                prop_assert!(state.bounce_count >= config.required_bounces);
                let center = sprite_center(state.position, config.sprite_half());
                let cos = center_alignment(center, state.velocity, sim.boundary());
                prop_assert!(cos.is_some_and(|c| c > RETURN_ALIGNMENT));
            }
        }

        #[test]
        fn prop_return_glide_is_bounded_and_uniform(seed in any::<u64>()) {
            let config = small_config();
            let trajectory = simulator(&config, seed).run();
            let steps = trajectory.return_steps;
            prop_assert!((config.return_min_steps..=config.return_max_steps).contains(&steps));
            prop_assert_eq!(trajectory.return_positions().len(), steps as usize);

            // Include the last bounce position so the first glide step is checked too
            let glide = &trajectory.positions.as_slice()[trajectory.bounce_frames as usize - 1..];
            let step = glide[1] - glide[0];
            for pair in glide.windows(2) {
                prop_assert!(((pair[1] - pair[0]) - step).length() < 1e-3);
            }
        }
    }
}
