use flock_core::{
    Agent, BoundaryPolicy, FlockSimulation, NeighborSearch, SimulationConfig, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TOLERANCE: f32 = 1e-4;

fn crowded_config() -> SimulationConfig {
    SimulationConfig {
        agent_count: 150,
        plane_half_extent: 20.0,
        agent_speed: 0.7,
        initial_speed: 0.3,
        separation_radius: 2.0,
        separation_weight: 0.5,
        cohesion_radius: 6.0,
        cohesion_weight: 0.05,
        alignment_radius: 5.0,
        alignment_weight: 0.2,
        ..Default::default()
    }
}

fn assert_invariants(flock: &FlockSimulation) {
    let config = flock.config();
    for (i, agent) in flock.agents().iter().enumerate() {
        assert!(
            agent.position.x.abs() <= config.plane_half_extent
                && agent.position.y.abs() <= config.plane_half_extent,
            "agent {} escaped the plane: {:?}",
            i,
            agent.position
        );
        assert_eq!(agent.position.z, 0.0, "agent {} left the plane", i);
        assert_eq!(agent.velocity.z, 0.0, "agent {} velocity left the plane", i);
        assert!(
            (agent.velocity.magnitude() - config.agent_speed).abs() < TOLERANCE,
            "agent {} speed {} != {}",
            i,
            agent.velocity.magnitude(),
            config.agent_speed
        );
    }
}

#[test]
fn test_wrap_keeps_agents_bounded_planar_and_at_speed() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut flock = FlockSimulation::with_rng(crowded_config(), &mut rng).unwrap();

    for _ in 0..300 {
        flock.step();
        assert_invariants(&flock);
    }
}

#[test]
fn test_bounce_keeps_agents_bounded_planar_and_at_speed() {
    let mut rng = StdRng::seed_from_u64(43);
    let config = SimulationConfig {
        boundary: BoundaryPolicy::Bounce { offset: 0.5 },
        ..crowded_config()
    };
    let mut flock = FlockSimulation::with_rng(config, &mut rng).unwrap();

    for _ in 0..300 {
        flock.step();
        assert_invariants(&flock);
    }
}

#[test]
fn test_isolated_agent_keeps_heading() {
    let config = SimulationConfig {
        plane_half_extent: 1000.0,
        agent_speed: 2.0,
        ..Default::default()
    };
    let agents = vec![Agent::new(Vec3::planar(0.0, 0.0), Vec3::planar(0.0, 2.0))];
    let mut flock = FlockSimulation::from_agents(config, agents).unwrap();

    for tick in 1..=10 {
        assert_eq!(flock.compute_accelerations(), vec![Vec3::zero()]);
        flock.step();

        let agent = &flock.agents()[0];
        assert_eq!(agent.velocity, Vec3::planar(0.0, 2.0));
        assert_eq!(agent.position, Vec3::planar(0.0, 2.0 * tick as f32));
    }
}

#[test]
fn test_extreme_speeds_hold_constant() {
    for speed in [1.0e20, 1.0e-25] {
        let config = SimulationConfig {
            agent_speed: speed,
            ..Default::default()
        };
        let agents = vec![Agent::new(Vec3::zero(), Vec3::planar(speed, 0.0))];
        let mut flock = FlockSimulation::from_agents(config, agents).unwrap();

        for _ in 0..3 {
            flock.step();
            let agent = &flock.agents()[0];
            assert!(agent.velocity.is_finite());
            assert!((agent.velocity.x - speed).abs() <= speed * TOLERANCE);
            assert_eq!(agent.velocity.y, 0.0);
        }
    }
}

#[test]
fn test_explicit_state_is_deterministic() {
    let agents: Vec<Agent> = (0..40)
        .map(|i| {
            let f = i as f32;
            Agent::new(
                Vec3::planar((f * 1.7) % 30.0 - 15.0, (f * 3.1) % 30.0 - 15.0),
                Vec3::planar((f * 0.37).cos(), (f * 0.37).sin()),
            )
        })
        .collect();

    let mut a = FlockSimulation::from_agents(crowded_config(), agents.clone()).unwrap();
    let mut b = FlockSimulation::from_agents(crowded_config(), agents).unwrap();

    for _ in 0..100 {
        a.step();
        b.step();
    }

    assert_eq!(a.agents(), b.agents());
    assert_eq!(a.tick(), 100);
}

#[test]
fn test_seeded_spawn_is_reproducible() {
    let a = FlockSimulation::with_rng(crowded_config(), &mut StdRng::seed_from_u64(9)).unwrap();
    let b = FlockSimulation::with_rng(crowded_config(), &mut StdRng::seed_from_u64(9)).unwrap();

    assert_eq!(a.agents(), b.agents());
}

#[test]
fn test_two_agent_scenario() {
    let config = SimulationConfig {
        plane_half_extent: 100.0,
        agent_speed: 1.0,
        separation_radius: 10.0,
        separation_weight: 1.0,
        ..Default::default()
    };
    let agents = vec![
        Agent::new(Vec3::planar(0.0, 0.0), Vec3::planar(1.0, 0.0)),
        Agent::new(Vec3::planar(5.0, 0.0), Vec3::planar(1.0, 0.0)),
    ];
    let mut flock = FlockSimulation::from_agents(config, agents).unwrap();

    let separation: Vec<_> = (0..2)
        .map(|i| flock.steering_for(i).unwrap().separation)
        .collect();
    assert_eq!(separation[0], Vec3::planar(-0.5, 0.0));
    assert_eq!(separation[1], Vec3::planar(0.5, 0.0));

    flock.step();

    assert_eq!(flock.tick(), 1);
    for agent in flock.agents() {
        assert!((agent.velocity.magnitude() - 1.0).abs() < TOLERANCE);
        assert_eq!(agent.velocity.y, 0.0);
    }
}

#[test]
fn test_wrap_scenario_through_step() {
    let config = SimulationConfig {
        plane_half_extent: 10.0,
        agent_speed: 1.5,
        ..Default::default()
    };
    let agents = vec![
        Agent::new(Vec3::planar(9.5, 0.0), Vec3::planar(1.0, 0.0)),
        Agent::new(Vec3::planar(-9.5, 5.0), Vec3::planar(-1.0, 0.0)),
    ];
    let mut flock = FlockSimulation::from_agents(config, agents).unwrap();

    flock.step();

    let agents = flock.agents();
    assert_eq!(agents[0].position.x, -10.0);
    assert_eq!(agents[0].velocity, Vec3::planar(1.5, 0.0));
    assert_eq!(agents[1].position.x, 10.0);
    assert_eq!(agents[1].velocity, Vec3::planar(-1.5, 0.0));
}

#[test]
fn test_resize_fifty_then_ten() {
    let mut flock = FlockSimulation::new(SimulationConfig::default()).unwrap();

    flock.resize(50).unwrap();
    let fifty = flock.agents().to_vec();
    flock.resize(10).unwrap();

    assert_eq!(flock.len(), 10);
    assert!(flock.agents().iter().all(|agent| !fifty.contains(agent)));
}

#[test]
fn test_grid_search_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(5);
    let brute = FlockSimulation::with_rng(crowded_config(), &mut rng).unwrap();
    let grid = FlockSimulation::from_agents(
        SimulationConfig {
            neighbor_search: NeighborSearch::Grid,
            ..crowded_config()
        },
        brute.agents().to_vec(),
    )
    .unwrap();

    let expected = brute.compute_accelerations();
    let actual = grid.compute_accelerations();

    assert_eq!(expected.len(), actual.len());
    for (e, a) in expected.iter().zip(actual.iter()) {
        assert!(e.distance(a) < TOLERANCE, "{:?} vs {:?}", e, a);
    }
}

#[test]
fn test_grid_search_stays_bounded_over_time() {
    let mut rng = StdRng::seed_from_u64(6);
    let config = SimulationConfig {
        neighbor_search: NeighborSearch::Grid,
        ..crowded_config()
    };
    let mut flock = FlockSimulation::with_rng(config, &mut rng).unwrap();

    for _ in 0..100 {
        flock.step();
        assert_invariants(&flock);
    }
}
