//! Multi-fire worlds: scheduling, spread and torch transfer
use hearth_core::{
    EnvironmentSample, FireConfig, FirePhase, FireWorld, FuelCategory, ScriptedRandom,
    SpreadResolver, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn blazing_wildfire(world: &mut FireWorld, position: Vec3) -> hearth_core::FireId {
    let id = world.spawn(FireConfig::wildfire(), position);
    let fire = world.get_mut(id).unwrap();
    fire.add_fuel(FuelCategory::Coal, 500.0, false);
    fire.ignite_from_heat(950.0);
    id
}

#[test]
fn wildfire_spreads_along_a_line() {
    let mut world = FireWorld::new();
    let first = blazing_wildfire(&mut world, Vec3::zeros());
    let brush: Vec<_> = (1..=3)
        .map(|i| {
            let id = world.spawn(FireConfig::wildfire(), Vec3::new(i as f32 * 10.0, 0.0, 0.0));
            world.get_mut(id).unwrap().add_fuel(FuelCategory::Coal, 500.0, false);
            id
        })
        .collect();

    let mut rng = ScriptedRandom::always(0.0);
    let calm = EnvironmentSample::CALM;

    let report = world.tick(&calm, 0.2, &mut rng);
    // Reach is 22.5m, so the 30m fire waits for a neighbour to catch
    assert!(report.spread.contains(&(first, brush[0])));
    assert!(report.spread.contains(&(first, brush[1])));
    assert!(!report.spread.iter().any(|(_, to)| *to == brush[2]));

    // Newly caught wildfires pass the flame on
    for _ in 0..20 {
        world.tick(&calm, 0.2, &mut rng);
    }
    assert!(world.get(brush[2]).unwrap().state().is_lit());
}

#[test]
fn starved_wildfire_does_not_spread() {
    let mut world = FireWorld::new();
    let source = world.spawn(FireConfig::wildfire(), Vec3::zeros());
    world.get_mut(source).unwrap().add_fuel(FuelCategory::Coal, 200.0, false);
    world.get_mut(source).unwrap().ignite_from_heat(1000.0);
    let target = world.spawn(FireConfig::campfire(), Vec3::new(1.0, 0.0, 0.0));

    let mut rng = ScriptedRandom::always(0.0);
    for _ in 0..50 {
        let report = world.tick(&EnvironmentSample::CALM, 0.2, &mut rng);
        assert!(report.spread.is_empty());
    }
    assert_eq!(world.get(target).unwrap().state(), FirePhase::Unlit);
}

#[test]
fn custom_resolver_changes_reach() {
    let resolver = SpreadResolver {
        reach_factor: 0.5,
        ..SpreadResolver::default()
    };
    let mut world = FireWorld::new().with_spread_resolver(resolver);
    blazing_wildfire(&mut world, Vec3::zeros());
    let target = world.spawn(FireConfig::campfire(), Vec3::new(10.0, 0.0, 0.0));

    let mut rng = ScriptedRandom::always(0.0);
    world.tick(&EnvironmentSample::CALM, 0.2, &mut rng);
    assert_eq!(world.get(target).unwrap().state(), FirePhase::Unlit);
}

#[test]
fn torch_carries_flame_between_fires() {
    let mut world = FireWorld::new();
    let camp = world.spawn(FireConfig::campfire(), Vec3::zeros());
    let torch = world.spawn(FireConfig::torch(), Vec3::new(0.5, 0.0, 0.0));
    let forge = world.spawn(FireConfig::forge(), Vec3::new(8.0, 0.0, 0.0));

    {
        let fire = world.get_mut(camp).unwrap();
        fire.add_fuel(FuelCategory::Logs, 80.0, false);
        fire.ignite_from_heat(450.0);
    }
    let mut rng = StdRng::seed_from_u64(3);
    world.tick(&EnvironmentSample::CALM, 0.2, &mut rng);
    assert!(world.get(camp).unwrap().state().is_flaming());

    assert!(world.light_from(camp, torch));
    // The torch starts Igniting, so it cannot pass the flame on yet
    world.get_mut(forge).unwrap().add_fuel(FuelCategory::Coal, 100.0, false);
    assert!(!world.light_from(torch, forge));

    for _ in 0..5 {
        world.tick(&EnvironmentSample::CALM, 0.2, &mut rng);
    }
    assert!(world.get(torch).unwrap().state().is_flaming());
    assert!(world.light_from(torch, forge));
    assert_eq!(world.get(forge).unwrap().state(), FirePhase::Igniting);
}

#[test]
fn advance_matches_manual_ticks() {
    fn build() -> FireWorld {
        let mut world = FireWorld::new();
        let id = world.spawn(FireConfig::campfire(), Vec3::zeros());
        let fire = world.get_mut(id).unwrap();
        fire.add_fuel(FuelCategory::Hardwood, 60.0, false);
        fire.ignite_from_heat(350.0);
        world
    }

    let env = EnvironmentSample::new(4.0, 0.1);
    let mut stepped = build();
    let mut advanced = build();
    let mut rng_a = StdRng::seed_from_u64(11);
    let mut rng_b = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        stepped.tick(&env, 0.2, &mut rng_a);
    }
    let report = advanced.advance(2.1, &env, &mut rng_b);
    assert_eq!(report.ticks, 10);

    let a = stepped.get(stepped.ids()[0]).unwrap().to_save_record();
    let b = advanced.get(advanced.ids()[0]).unwrap().to_save_record();
    assert_eq!(a, b);
}

#[test]
fn removed_fires_stop_ticking() {
    let mut world = FireWorld::new();
    let id = blazing_wildfire(&mut world, Vec3::zeros());
    let removed = world.remove(id).unwrap();
    assert_eq!(removed.id(), id);

    let mut rng = ScriptedRandom::always(0.0);
    let report = world.tick(&EnvironmentSample::CALM, 0.2, &mut rng);
    assert!(report.extinguished.is_empty());
    assert!(world.is_empty());
    assert_eq!(world.get_stats().total_fires, 0);
}
