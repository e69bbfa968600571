//! Spawn helpers для акторов и объектов уровня

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::components::{
    ActorKind, AnimationState, AttackVolume, BounceObstacle, ChaseIntent, CollisionVolume,
    ContactDamage, Health, KinematicState, Knockback, MoveIntent, PushableObstacle, TelegraphCycle,
};

/// HP игрока
pub const PLAYER_MAX_HEALTH: u32 = 10;
/// HP паука
pub const SPIDER_MAX_HEALTH: u32 = 3;
/// HP босса
pub const BOSS_MAX_HEALTH: u32 = 10;

/// Игрок: управляется IntentMap, атакует удерживаемым attack-объёмом
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            ActorKind::Player,
            Transform::from_translation(position),
            Health::new(PLAYER_MAX_HEALTH),
            CollisionVolume::new(Vec3::splat(0.6)),
            KinematicState::default(),
            MoveIntent::default(),
            Knockback::default(),
            AttackVolume::new(Vec3::splat(0.75)),
            AnimationState::default(),
        ))
        .id()
}

/// Паук: преследует target, урон контактом тела
pub fn spawn_spider(commands: &mut Commands, position: Vec3, target: Entity) -> Entity {
    commands
        .spawn((
            ActorKind::Spider,
            Transform::from_translation(position),
            Health::new(SPIDER_MAX_HEALTH),
            // Вытянутый вдоль оси движения bounding box
            CollisionVolume::new(Vec3::new(0.25, 0.25, 0.4)),
            KinematicState::default(),
            MoveIntent::default(),
            Knockback::default(),
            ContactDamage,
            ChaseIntent::new(target),
            AnimationState::default(),
        ))
        .id()
}

/// Босс: стационарный, телеграфированный attack-объём по таймеру
/// плюс контактный урон тела
pub fn spawn_boss(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            ActorKind::Boss,
            // Начальная ориентация боком к точке спавна игрока
            Transform::from_translation(position).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
            Health::new(BOSS_MAX_HEALTH),
            CollisionVolume::new(Vec3::new(0.25, 0.25, 0.4)),
            Knockback::default(),
            ContactDamage,
            // Attack cube размером 7 вокруг босса
            AttackVolume::new(Vec3::splat(3.5)),
            TelegraphCycle::default(),
        ))
        .id()
}

/// Bounce-препятствие (декор, отталкивает игрока)
pub fn spawn_bounce_obstacle(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((BounceObstacle, Transform::from_translation(position)))
        .id()
}

/// Pushable-объект (игрок толкает его, удерживая grab)
pub fn spawn_pushable(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((PushableObstacle, Transform::from_translation(position)))
        .id()
}
