use dronewell_core::{
    Allegiance, BlockedSides, Command, DroneKind, EnemyKind, EntityId, Facing, ProjectileKind,
    ProjectileSpec,
};
use dronewell_system_behavior::{Behavior, TickContext, CRUISE_SPEED, PUNCH_SPEED};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const UNIT: EntityId = EntityId::new(3, 1);

fn context(facing: Facing, allegiance: Allegiance) -> TickContext {
    TickContext {
        entity: UNIT,
        position: Vec2::new(16.0, 16.0),
        facing,
        allegiance,
        power: 10,
        player_position: Some(Vec2::new(16.0, 200.0)),
        boss_room_open: false,
        powered_boss_pylons: 0,
        section: 0,
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x5eed)
}

fn fired(commands: &[Command]) -> Vec<(Vec2, Allegiance, ProjectileSpec)> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::FireProjectile {
                direction,
                allegiance,
                spec,
                ..
            } => Some((*direction, *allegiance, *spec)),
            _ => None,
        })
        .collect()
}

fn facing_changes(commands: &[Command]) -> Vec<Facing> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::SetFacing { facing, .. } => Some(*facing),
            _ => None,
        })
        .collect()
}

fn velocities(commands: &[Command]) -> Vec<Vec2> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::SetVelocity { velocity, .. } => Some(*velocity),
            _ => None,
        })
        .collect()
}

#[test]
fn every_tick_starts_with_upkeep() {
    let mut behavior = Behavior::for_drone(DroneKind::Turret, Facing::Left);
    let mut out = Vec::new();
    behavior.tick(&context(Facing::Left, Allegiance::Friendly), &mut rng(), &mut out);

    assert_eq!(out.first(), Some(&Command::TickUpkeep { entity: UNIT }));
    let shots = fired(&out);
    assert_eq!(shots.len(), 1, "turret fires every tick");
    assert_eq!(shots[0].0, Vec2::new(-1.0, 0.0));
    assert_eq!(shots[0].1, Allegiance::Friendly);
    assert_eq!(shots[0].2, ProjectileSpec::GUN);
}

#[test]
fn turret_shots_leave_from_the_muzzle() {
    let mut behavior = Behavior::for_drone(DroneKind::Turret, Facing::Down);
    let mut out = Vec::new();
    behavior.tick(&context(Facing::Down, Allegiance::Friendly), &mut rng(), &mut out);
    match out.last() {
        Some(Command::FireProjectile { origin, .. }) => assert_eq!(*origin, Vec2::new(16.0, 24.0)),
        other => panic!("expected projectile, got {other:?}"),
    }
}

#[test]
fn tracker_aims_every_tick_and_fires_every_other() {
    let mut behavior = Behavior::for_drone(DroneKind::Tracker, Facing::Up);
    let mut rng = rng();

    let mut first = Vec::new();
    behavior.tick(&context(Facing::Up, Allegiance::Friendly), &mut rng, &mut first);
    assert_eq!(facing_changes(&first), vec![Facing::Down]);
    assert!(fired(&first).is_empty());

    let mut second = Vec::new();
    behavior.tick(&context(Facing::Down, Allegiance::Friendly), &mut rng, &mut second);
    let shots = fired(&second);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].2.kind(), ProjectileKind::Tracker);
    assert_eq!(shots[0].0, Vec2::new(0.0, 1.0));
}

#[test]
fn missing_player_skips_aiming_without_failing() {
    let mut behavior = Behavior::for_enemy(EnemyKind::HoverTurret, Facing::Left);
    let mut ctx = context(Facing::Left, Allegiance::Hostile);
    ctx.player_position = None;
    let mut out = Vec::new();
    behavior.tick(&ctx, &mut rng(), &mut out);
    assert!(facing_changes(&out).is_empty());
    assert_eq!(out, vec![Command::TickUpkeep { entity: UNIT }]);
}

#[test]
fn enemy_turret_turns_then_fires_hostile_shots() {
    let mut behavior = Behavior::for_enemy(EnemyKind::Turret, Facing::Up);
    let mut rng = rng();

    let mut turn = Vec::new();
    behavior.tick(&context(Facing::Up, Allegiance::Hostile), &mut rng, &mut turn);
    assert_eq!(facing_changes(&turn), vec![Facing::Right]);
    assert!(fired(&turn).is_empty());

    let mut shoot = Vec::new();
    behavior.tick(&context(Facing::Right, Allegiance::Hostile), &mut rng, &mut shoot);
    let shots = fired(&shoot);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].1, Allegiance::Hostile);
    assert_eq!(shots[0].0, Vec2::new(1.0, 0.0));
}

#[test]
fn hover_turret_aims_only_when_its_facing_is_off() {
    let mut behavior = Behavior::for_enemy(EnemyKind::HoverTurret, Facing::Up);
    let mut rng = rng();

    let mut aim = Vec::new();
    behavior.tick(&context(Facing::Up, Allegiance::Hostile), &mut rng, &mut aim);
    assert_eq!(facing_changes(&aim), vec![Facing::Down]);
    assert!(fired(&aim).is_empty());

    let mut shoot = Vec::new();
    behavior.tick(&context(Facing::Down, Allegiance::Hostile), &mut rng, &mut shoot);
    assert!(facing_changes(&shoot).is_empty());
    assert_eq!(fired(&shoot).len(), 1);

    let mut settled = Vec::new();
    behavior.tick(&context(Facing::Down, Allegiance::Hostile), &mut rng, &mut settled);
    assert!(facing_changes(&settled).is_empty());
    assert_eq!(settled, vec![Command::TickUpkeep { entity: UNIT }]);
}

#[test]
fn multishot_fans_three_bullets_on_alternate_ticks() {
    let mut behavior = Behavior::for_drone(DroneKind::Multishot, Facing::Up);
    let mut rng = rng();
    let ctx = context(Facing::Up, Allegiance::Friendly);

    let mut idle = Vec::new();
    behavior.tick(&ctx, &mut rng, &mut idle);
    assert!(fired(&idle).is_empty());

    let mut volley = Vec::new();
    behavior.tick(&ctx, &mut rng, &mut volley);
    let directions: Vec<Vec2> = fired(&volley).into_iter().map(|shot| shot.0).collect();
    assert_eq!(
        directions,
        vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, -1.0)
        ]
    );
    assert!(fired(&volley)
        .iter()
        .all(|shot| shot.2 == ProjectileSpec::FAN));
}

#[test]
fn puncher_reverses_on_walls_with_debounce() {
    let mut behavior = Behavior::for_drone(DroneKind::Puncher, Facing::Right);
    let mut rng = rng();
    let blocked = BlockedSides {
        right: true,
        ..BlockedSides::default()
    };

    let mut out = Vec::new();
    behavior.tick(&context(Facing::Right, Allegiance::Friendly), &mut rng, &mut out);
    assert_eq!(velocities(&out), vec![Vec2::new(PUNCH_SPEED, 0.0)]);

    let mut bounce = Vec::new();
    assert!(behavior.wall_collision(
        &context(Facing::Right, Allegiance::Friendly),
        blocked,
        &mut rng,
        &mut bounce
    ));
    assert_eq!(facing_changes(&bounce), vec![Facing::Left]);
    assert_eq!(velocities(&bounce), vec![Vec2::new(-PUNCH_SPEED, 0.0)]);
    assert!(bounce.contains(&Command::TickUpkeep { entity: UNIT }));

    let mut ignored = Vec::new();
    assert!(
        !behavior.wall_collision(
            &context(Facing::Left, Allegiance::Friendly),
            blocked,
            &mut rng,
            &mut ignored
        ),
        "sustained contact must not flip again"
    );
    assert!(ignored.is_empty());

    for _ in 0..2 {
        behavior.tick(&context(Facing::Left, Allegiance::Friendly), &mut rng, &mut Vec::new());
    }
    assert!(behavior.wall_collision(
        &context(Facing::Left, Allegiance::Friendly),
        blocked,
        &mut rng,
        &mut Vec::new()
    ));
}

#[test]
fn boomerang_reflects_and_reticks() {
    let mut behavior = Behavior::for_enemy(EnemyKind::SpinBoomerang, Facing::Up);
    let mut out = Vec::new();
    let blocked = BlockedSides {
        up: true,
        ..BlockedSides::default()
    };
    assert!(behavior.wall_collision(
        &context(Facing::Up, Allegiance::Hostile),
        blocked,
        &mut rng(),
        &mut out
    ));
    assert_eq!(facing_changes(&out), vec![Facing::Right]);
    assert_eq!(
        velocities(&out),
        vec![Vec2::new(CRUISE_SPEED, CRUISE_SPEED)],
        "re-tick uses the reflected diagonal"
    );
}

#[test]
fn strafer_reverses_patrol_but_keeps_aim() {
    let mut behavior = Behavior::for_enemy(EnemyKind::DirectionalTurret, Facing::Up);
    let mut rng = rng();
    let ctx = context(Facing::Up, Allegiance::Hostile);

    let mut out = Vec::new();
    behavior.tick(&ctx, &mut rng, &mut out);
    assert_eq!(velocities(&out), vec![Vec2::new(CRUISE_SPEED, 0.0)]);
    assert_eq!(fired(&out)[0].0, Vec2::new(0.0, -1.0));

    let mut bounce = Vec::new();
    assert!(behavior.wall_collision(&ctx, BlockedSides::default(), &mut rng, &mut bounce));
    assert_eq!(velocities(&bounce), vec![Vec2::new(-CRUISE_SPEED, 0.0)]);
    assert!(facing_changes(&bounce).is_empty());
}

#[test]
fn chaser_alternates_pursuit_axes() {
    let mut behavior = Behavior::for_enemy(EnemyKind::HoverPuncher, Facing::Up);
    let mut rng = rng();
    let mut ctx = context(Facing::Up, Allegiance::Hostile);
    ctx.player_position = Some(Vec2::new(-100.0, 300.0));

    let mut horizontal = Vec::new();
    behavior.tick(&ctx, &mut rng, &mut horizontal);
    assert_eq!(facing_changes(&horizontal), vec![Facing::Left]);
    assert_eq!(velocities(&horizontal), vec![Vec2::new(-CRUISE_SPEED, 0.0)]);

    ctx.facing = Facing::Left;
    let mut vertical = Vec::new();
    behavior.tick(&ctx, &mut rng, &mut vertical);
    assert_eq!(facing_changes(&vertical), vec![Facing::Down]);
    assert_eq!(velocities(&vertical), vec![Vec2::new(0.0, CRUISE_SPEED)]);
}

#[test]
fn boss_waits_until_its_room_opens() {
    let mut behavior = Behavior::for_enemy(EnemyKind::Boss, Facing::Down);
    let mut out = Vec::new();
    behavior.tick(&context(Facing::Down, Allegiance::Hostile), &mut rng(), &mut out);
    assert_eq!(out, vec![Command::TickUpkeep { entity: UNIT }]);
    assert_eq!(behavior.subtick(), Some(0));
}

#[test]
fn boss_walks_in_bursts_and_summons_every_seventeen_ticks() {
    let mut behavior = Behavior::for_enemy(EnemyKind::Boss, Facing::Down);
    let mut rng = rng();
    let mut ctx = context(Facing::Down, Allegiance::Hostile);
    ctx.boss_room_open = true;
    ctx.powered_boss_pylons = 2;
    ctx.section = 1;

    let mut waves = Vec::new();
    for tick in 0..34u32 {
        let mut out = Vec::new();
        behavior.tick(&ctx, &mut rng, &mut out);
        let velocity = velocities(&out);
        assert_eq!(velocity.len(), 1);
        let phase = tick % 17;
        if phase % 4 != 0 {
            assert_eq!(velocity[0], Vec2::ZERO, "boss idles between bursts");
        } else {
            assert!(velocity[0].x.abs() <= CRUISE_SPEED && velocity[0].y.abs() <= CRUISE_SPEED);
        }
        for command in out {
            if let Command::SpawnEnemyWave { budget, .. } = command {
                waves.push((tick, budget));
            }
        }
    }

    assert_eq!(waves.len(), 2);
    assert_eq!(waves[0].0, 16);
    assert_eq!(waves[1].0, 33);
    for (_, budget) in waves {
        assert!(
            (20..=40).contains(&budget),
            "budget {budget} outside (1..=3 + 1) * 10"
        );
    }
}
