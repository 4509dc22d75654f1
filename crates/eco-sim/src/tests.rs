//! Integration tests for eco-sim.

use eco_agent::{AgentStore, AgentStoreBuilder, Census, DeathCause};
use eco_behavior::{fox, grass, rabbit, NoopBehavior};
use eco_core::{EcosystemConfig, InitialPopulation, SimConfig, SimRng, Tick, Vec2};
use eco_spatial::ScanIndex;

use crate::{AgentRecord, NoopObserver, RecordLabel, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const LONG_LIFE: u32 = 1_000_000;

fn test_config(duration_ticks: u64) -> SimConfig {
    SimConfig {
        duration_ticks,
        seed: 42,
        ticks_per_second: 60,
        output_interval_ticks: 1,
    }
}

fn small_ecosystem() -> EcosystemConfig {
    EcosystemConfig {
        population: InitialPopulation { foxes: 3, rabbits: 5, grass: 10 },
        ..EcosystemConfig::default()
    }
}

/// Hand-placed population; creation noise from a throwaway stream.
struct Placer<'a> {
    config:  &'a EcosystemConfig,
    rng:     SimRng,
    builder: AgentStoreBuilder,
}

impl<'a> Placer<'a> {
    fn new(config: &'a EcosystemConfig) -> Self {
        Self { config, rng: SimRng::new(9), builder: AgentStoreBuilder::new() }
    }

    fn fox(mut self, x: f64, y: f64, energy: u32, hunger: u32) -> Self {
        let mut agent = fox::create(self.config, &mut self.rng, Vec2::new(x, y));
        agent.vitals.lifespan = LONG_LIFE;
        agent.vitals.energy = energy;
        agent.vitals.hunger_threshold = hunger;
        self.builder = self.builder.push(agent);
        self
    }

    fn rabbit(mut self, x: f64, y: f64, energy: u32) -> Self {
        let mut agent = rabbit::create(self.config, &mut self.rng, Vec2::new(x, y));
        agent.vitals.lifespan = LONG_LIFE;
        agent.vitals.energy = energy;
        self.builder = self.builder.push(agent);
        self
    }

    fn grass(mut self, x: f64, y: f64) -> Self {
        let agent = grass::create(&self.config.grass, &mut self.rng, Vec2::new(x, y));
        self.builder = self.builder.push(agent);
        self
    }

    fn build(self) -> AgentStore {
        self.builder.build()
    }
}

/// Observer that keeps everything it is shown.
#[derive(Default)]
struct Collect {
    starts:    Vec<Tick>,
    snapshots: Vec<(Tick, Census)>,
    records:   Vec<AgentRecord>,
    ends:      Vec<Census>,
    finished:  Option<(Tick, Census)>,
}

impl Collect {
    fn records_at(&self, tick: u64) -> Vec<&AgentRecord> {
        self.records.iter().filter(|r| r.tick == Tick(tick)).collect()
    }
}

impl SimObserver for Collect {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_snapshot(&mut self, tick: Tick, records: &[AgentRecord], census: &Census) {
        self.snapshots.push((tick, *census));
        self.records.extend_from_slice(records);
    }

    fn on_tick_end(&mut self, _tick: Tick, census: &Census) {
        self.ends.push(*census);
    }

    fn on_sim_end(&mut self, final_tick: Tick, census: &Census) {
        self.finished = Some((final_tick, *census));
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn batch_spawn_foxes_then_rabbits_then_grass() {
        let sim = SimBuilder::new(test_config(10), EcosystemConfig::default()).build().unwrap();
        assert_eq!(sim.agents.live_count(), 100);
        let labels: Vec<RecordLabel> = sim
            .agents
            .live_ids()
            .map(|id| RecordLabel::of(&sim.agents.species[id]))
            .collect();
        assert!(labels[..20].iter().all(|l| *l == RecordLabel::Fox));
        assert!(labels[20..40].iter().all(|l| *l == RecordLabel::Rabbit));
        assert!(labels[40..].iter().all(|l| *l == RecordLabel::Grass));
    }

    #[test]
    fn spawned_inside_the_world() {
        let config = EcosystemConfig::default();
        let sim = SimBuilder::new(test_config(10), config.clone()).build().unwrap();
        let planting = config.world.planting_area();
        for id in sim.agents.live_ids() {
            let p = sim.agents.pos[id];
            assert!((0.0..=750.0).contains(&p.x) && (0.0..=750.0).contains(&p.y));
            if sim.agents.species[id].as_grass().is_some() {
                assert!(p.x >= planting.min.x && p.x <= planting.max.x);
                assert!(p.y >= planting.min.y && p.y <= planting.max.y);
            }
        }
    }

    #[test]
    fn newborn_creatures_start_just_hungry() {
        let config = EcosystemConfig::default();
        let sim = SimBuilder::new(test_config(10), config.clone()).build().unwrap();
        for id in sim.agents.live_ids() {
            let v = &sim.agents.vitals[id];
            match RecordLabel::of(&sim.agents.species[id]) {
                RecordLabel::Fox => assert_eq!(v.energy, config.fox.hunger_threshold - 1),
                RecordLabel::Rabbit => assert_eq!(v.energy, config.rabbit.hunger_threshold - 1),
                _ => {}
            }
        }
    }

    #[test]
    fn same_seed_same_population() {
        let a = SimBuilder::new(test_config(10), EcosystemConfig::default()).build().unwrap();
        let b = SimBuilder::new(test_config(10), EcosystemConfig::default()).build().unwrap();
        assert_eq!(a.agents.pos, b.agents.pos);
        assert_eq!(a.agents.vitals, b.agents.vitals);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = EcosystemConfig::default();
        config.rabbit.p_reproduce = 1.5;
        let result = SimBuilder::new(test_config(10), config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_scent_interval_rejected() {
        let mut config = EcosystemConfig::default();
        config.scent = Some(eco_core::ScentParams { lifetime: 120, interval: 0 });
        assert!(SimBuilder::new(test_config(10), config).build().is_err());
    }

    #[test]
    fn degenerate_obstacle_rejected() {
        let flat = eco_core::Rect::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 50.0));
        let result = SimBuilder::new(test_config(10), EcosystemConfig::default())
            .obstacles(vec![flat])
            .build();
        assert!(matches!(result, Err(SimError::Landscape(_))));
    }

    #[test]
    fn explicit_population_skips_batch_spawn() {
        let config = EcosystemConfig::default();
        let store = Placer::new(&config).rabbit(10.0, 10.0, 599).build();
        let sim = SimBuilder::new(test_config(10), config).population(store).build().unwrap();
        assert_eq!(sim.agents.live_count(), 1);
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(10), small_ecosystem()).build().unwrap();
        let census = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.now(), Tick(10));
        assert_eq!(census, sim.census());
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(test_config(100), small_ecosystem()).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), Tick(8));
    }

    #[test]
    fn observer_hooks_fire_per_tick() {
        let mut sim = SimBuilder::new(test_config(7), small_ecosystem()).build().unwrap();
        let mut obs = Collect::default();
        let census = sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(obs.ends.len(), 7);
        assert_eq!(obs.snapshots.len(), 7);
        assert_eq!(obs.finished, Some((Tick(7), census)));
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let config = SimConfig { output_interval_ticks: 5, ..test_config(12) };
        let mut sim = SimBuilder::new(config, small_ecosystem()).build().unwrap();
        let mut obs = Collect::default();
        sim.run(&mut obs).unwrap();
        let ticks: Vec<Tick> = obs.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(5), Tick(10)]);
        assert_eq!(obs.ends.len(), 12);
    }

    #[test]
    fn zero_interval_disables_output() {
        let config = SimConfig { output_interval_ticks: 0, ..test_config(4) };
        let mut sim = SimBuilder::new(config, small_ecosystem()).build().unwrap();
        let mut obs = Collect::default();
        sim.run(&mut obs).unwrap();
        assert!(obs.snapshots.is_empty());
        assert!(obs.records.is_empty());
    }

    #[test]
    fn noop_behavior_keeps_population() {
        let mut sim = SimBuilder::new(test_config(20), small_ecosystem())
            .behavior(NoopBehavior)
            .build()
            .unwrap();
        let before = sim.census();
        let after = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn same_seed_same_records() {
        let run = |seed| {
            let config = SimConfig { seed, ..test_config(200) };
            let mut sim = SimBuilder::new(config, small_ecosystem()).build().unwrap();
            let mut obs = Collect::default();
            sim.run(&mut obs).unwrap();
            obs.records
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn index_choice_does_not_change_results() {
        let run_rtree = {
            let mut sim = SimBuilder::new(test_config(150), small_ecosystem()).build().unwrap();
            let mut obs = Collect::default();
            sim.run(&mut obs).unwrap();
            obs.records
        };
        let run_scan = {
            let mut sim = SimBuilder::new(test_config(150), small_ecosystem())
                .index(ScanIndex::new())
                .build()
                .unwrap();
            let mut obs = Collect::default();
            sim.run(&mut obs).unwrap();
            obs.records
        };
        assert_eq!(run_rtree, run_scan);
    }
}

// ── Tick discipline ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn capture_is_recorded_with_death_cause() {
        let config = EcosystemConfig::default();
        let store = Placer::new(&config).fox(100.0, 100.0, 50, 100).rabbit(110.0, 100.0, 599).build();
        let mut sim = SimBuilder::new(test_config(10), config.clone()).population(store).build().unwrap();
        let mut obs = Collect::default();
        sim.run_ticks(1, &mut obs).unwrap();

        let records = obs.records_at(0);
        assert_eq!(records.len(), 2, "the eaten rabbit is still recorded");
        let fox = records[0];
        let rabbit = records[1];
        assert_eq!(fox.label, RecordLabel::Fox);
        assert!(fox.ate);
        assert_eq!(fox.energy, 49 + config.fox.nutrition);
        assert_eq!(rabbit.label, RecordLabel::Rabbit);
        assert_eq!(rabbit.death, Some(DeathCause::Eaten));
        assert_eq!(sim.census().rabbits, 0);
        assert_eq!(sim.census().foxes, 1);
    }

    #[test]
    fn dead_agent_is_not_recorded_next_tick() {
        let config = EcosystemConfig::default();
        let store = Placer::new(&config).fox(100.0, 100.0, 50, 100).rabbit(110.0, 100.0, 599).build();
        let mut sim = SimBuilder::new(test_config(10), config).population(store).build().unwrap();
        let mut obs = Collect::default();
        sim.run_ticks(2, &mut obs).unwrap();
        assert_eq!(obs.records_at(1).len(), 1);
    }

    #[test]
    fn dead_serial_never_recorded_again() {
        let mut sim = SimBuilder::new(test_config(400), small_ecosystem()).build().unwrap();
        let mut obs = Collect::default();
        sim.run(&mut obs).unwrap();

        let mut buried = std::collections::HashSet::new();
        let mut births = 0;
        for t in 0..400 {
            let records = obs.records_at(t);
            let serials: std::collections::HashSet<u64> = records.iter().map(|r| r.serial).collect();
            assert_eq!(serials.len(), records.len(), "tick {t}: serial shared by two agents");
            for r in records {
                assert!(!buried.contains(&r.serial), "tick {t}: serial {} recorded after death", r.serial);
                if r.death.is_some() {
                    buried.insert(r.serial);
                }
                births += usize::from(r.age == 0);
            }
        }
        assert!(!buried.is_empty() && births > 0, "run should churn slots");
    }

    #[test]
    fn births_appear_after_the_tick() {
        let mut config = EcosystemConfig::default();
        config.rabbit.p_reproduce = 1.0;
        let store = Placer::new(&config).rabbit(300.0, 300.0, 5_000).rabbit(305.0, 300.0, 5_000).build();
        let mut sim = SimBuilder::new(test_config(10), config.clone()).population(store).build().unwrap();
        let mut obs = Collect::default();
        sim.run_ticks(1, &mut obs).unwrap();

        let records = obs.records_at(0);
        assert_eq!(records.len(), 2);
        assert!(records[0].reproduced);
        assert!(!records[1].reproduced, "the mate is reset but not flagged");
        assert_eq!(records[0].energy, config.rabbit.hunger_threshold - 1);
        // Reset by its partner's attempt, then one tick of its own metabolism.
        assert_eq!(records[1].energy, config.rabbit.hunger_threshold - 2);
        assert_eq!(obs.ends[0].rabbits, 3);
        let newborn: Vec<_> = sim.agents.live_ids().filter(|&id| sim.agents.vitals[id].age == 0).collect();
        assert_eq!(newborn.len(), 1);
        assert_eq!(sim.agents.serial(newborn[0]), 2);
    }

    #[test]
    fn rabbit_marks_trail_on_interval() {
        let config = EcosystemConfig::default();
        let interval = config.scent.as_ref().unwrap().interval as u64;
        let store = Placer::new(&config).rabbit(300.0, 300.0, 599).build();
        let mut sim = SimBuilder::new(test_config(100), config).population(store).build().unwrap();

        sim.run_ticks(interval - 1, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 0);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 1);
        sim.run_ticks(interval, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 2);
    }

    #[test]
    fn base_model_leaves_no_trail() {
        let config = EcosystemConfig::default().without_scent();
        let store = Placer::new(&config).rabbit(300.0, 300.0, 599).build();
        let mut sim = SimBuilder::new(test_config(100), config).population(store).build().unwrap();
        sim.run_ticks(90, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 0);
        assert_eq!(sim.census().rabbits, 1);
    }

    #[test]
    fn trail_vanishes_with_its_rabbit() {
        let config = EcosystemConfig::default();
        let interval = config.scent.as_ref().unwrap().interval as u64;
        let store = Placer::new(&config).rabbit(300.0, 300.0, 599).build();
        let mut sim = SimBuilder::new(test_config(100), config).population(store).build().unwrap();
        sim.run_ticks(interval, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 1);

        let rabbit = sim.agents.live_ids().find(|&id| sim.agents.species[id].is_active_rabbit()).unwrap();
        sim.agents.kill(rabbit, DeathCause::Eaten);
        sim.agents.reap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().scents, 0);
    }

    #[test]
    fn eaten_grass_regrows_and_is_recorded_as_dead_grass() {
        let config = EcosystemConfig::default();
        let store = Placer::new(&config).rabbit(300.0, 300.0, 599).grass(305.0, 300.0).build();
        let mut sim = SimBuilder::new(test_config(100), config).population(store).build().unwrap();
        let mut obs = Collect::default();
        sim.run_ticks(2, &mut obs).unwrap();

        assert_eq!(obs.records_at(0)[1].label, RecordLabel::DeadGrass);
        assert!(obs.records_at(0)[0].ate);
        assert_eq!(obs.ends[0].grass_regrowing, 1);

        let delay = sim.agents.live_ids().find_map(|id| sim.agents.species[id].as_grass()).unwrap().regrow_delay as u64;
        sim.run_ticks(delay - 2, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().grass_regrowing, 1);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.census().grass_available, 1);
    }
}

// ── Batch runs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::{run_batch, Param, ParamGrid};

    fn tiny() -> EcosystemConfig {
        EcosystemConfig {
            population: InitialPopulation { foxes: 2, rabbits: 2, grass: 4 },
            ..EcosystemConfig::default()
        }
    }

    #[test]
    fn grid_is_cartesian_with_seeds_slowest() {
        let grid = ParamGrid::new(test_config(5), tiny())
            .seeds([1, 2])
            .axis(Param::FoxReproduce, [0.1, 0.2, 0.3])
            .axis(Param::HuntSpeed, [1.1]);
        assert_eq!(grid.len(), 6);

        let runs = grid.runs();
        assert_eq!(runs.len(), 6);
        assert!(runs.iter().enumerate().all(|(i, r)| r.id == i));
        assert!(runs[..3].iter().all(|r| r.sim.seed == 1));
        assert!(runs[3..].iter().all(|r| r.sim.seed == 2));
        let p: Vec<f64> = runs[..3].iter().map(|r| r.ecosystem.fox.p_reproduce).collect();
        assert_eq!(p, vec![0.1, 0.2, 0.3]);
        assert!(runs.iter().all(|r| r.ecosystem.fox.hunt_speed == 1.1));
    }

    #[test]
    fn repeated_axis_replaces_values() {
        let grid = ParamGrid::new(test_config(5), tiny())
            .axis(Param::GrassRegrowDelay, [100.0, 200.0])
            .axis(Param::GrassRegrowDelay, [300.0]);
        let runs = grid.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].ecosystem.grass.regrow_delay, 300);
    }

    #[test]
    fn scent_axis_enables_trails() {
        let grid = ParamGrid::new(test_config(5), tiny().without_scent()).axis(Param::ScentLifetime, [60.0]);
        let scent = grid.runs()[0].ecosystem.scent.clone().unwrap();
        assert_eq!(scent.lifetime, 60);
        assert_eq!(scent.interval, eco_core::ScentParams::default().interval);
    }

    #[test]
    fn empty_axis_empties_grid() {
        let grid = ParamGrid::new(test_config(5), tiny()).axis(Param::FoxLifespan, []);
        assert!(grid.is_empty());
        assert!(grid.runs().is_empty());
    }

    #[test]
    fn batch_runs_in_grid_order() {
        let runs = ParamGrid::new(test_config(5), tiny()).seeds([3, 4, 5]).runs();
        let results = run_batch(runs, |_| Collect::default());
        assert_eq!(results.len(), 3);
        for (i, result) in results.iter().enumerate() {
            let outcome = result.as_ref().unwrap();
            assert_eq!(outcome.spec.id, i);
            assert_eq!(outcome.observer.ends.len(), 5);
            assert_eq!(outcome.observer.finished.map(|(t, _)| t), Some(Tick(5)));
        }
    }

    #[test]
    fn batch_matches_single_run() {
        let runs = ParamGrid::new(test_config(50), tiny()).seeds([11]).runs();
        let batch = run_batch(runs.clone(), |_| NoopObserver);
        let mut sim = SimBuilder::new(runs[0].sim.clone(), runs[0].ecosystem.clone()).build().unwrap();
        let single = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(batch[0].as_ref().unwrap().census, single);
    }

    #[test]
    fn invalid_run_fails_alone() {
        let runs = ParamGrid::new(test_config(5), tiny()).axis(Param::RabbitReproduce, [0.5, 2.0]).runs();
        let results = run_batch(runs, |_| NoopObserver);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SimError::Config(_))));
    }
}
