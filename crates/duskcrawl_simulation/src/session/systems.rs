//! Session-системы: тик, препятствия, границы, смерть, deferred queue

use bevy::prelude::*;

use crate::combat::EntityDied;
use crate::components::{
    ActorKind, BounceObstacle, Dead, KinematicState, MoveIntent, PushableObstacle,
    BOUNCE_FORCE, BOUNCE_RADIUS, GRAB_RADIUS, GRAB_SPEED, WALK_SPEED,
};
use crate::logger::log_info;
use crate::session::resources::{
    DeferredAction, DeferredQueue, IntentMap, Score, SimulationConfig, SimulationTick,
};
use crate::session::spawn::spawn_player;

/// Половина высоты pushable-куба (кубик 1x1x1, стоит на полу)
const PUSHABLE_HALF_HEIGHT: f32 = 0.5;

/// Событие-нотификация для UI: прогресс-счётчик изменился
///
/// Ядро только эмитит; отображение — забота хоста.
#[derive(Event, Debug, Clone)]
pub struct ProgressChanged {
    pub counter: &'static str,
    pub value: u32,
}

/// Система: счётчик кадров, первый шаг каждого тика
pub fn advance_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 += 1;
}

/// Система: замедление игрока рядом с pushable-объектом
///
/// Скорость восстанавливается когда игрок отошёл дальше GRAB_RADIUS
/// от ВСЕХ pushable-объектов, а не в момент отпускания grab. Решение
/// принимается по всем объектам сразу: один дальний объект не
/// перезаписывает захват рядом с другим. Crouch-множитель скорости
/// сохраняется в обоих состояниях.
pub fn grab_pushable(
    intents: Res<IntentMap>,
    mut players: Query<(&ActorKind, &Transform, &mut KinematicState), Without<Dead>>,
    pushables: Query<&Transform, (With<PushableObstacle>, Without<KinematicState>)>,
) {
    for (kind, transform, mut kin) in players.iter_mut() {
        if *kind != ActorKind::Player {
            continue;
        }
        let mut near_any = false;
        let mut beyond_all = true;
        for pushable in pushables.iter() {
            let distance = transform.translation.distance(pushable.translation);
            if distance < GRAB_RADIUS {
                near_any = true;
            }
            if distance <= GRAB_RADIUS {
                beyond_all = false;
            }
        }

        let crouch_factor = if kin.crouching { 0.5 } else { 1.0 };
        if near_any && intents.grab {
            kin.move_speed = GRAB_SPEED * crouch_factor;
        } else if beyond_all {
            kin.move_speed = WALK_SPEED * crouch_factor;
        }
    }
}

/// Система: перемещение pushable-объекта за игроком (после движения)
pub fn push_pushable(
    intents: Res<IntentMap>,
    players: Query<(&ActorKind, &Transform, &MoveIntent, &KinematicState), Without<Dead>>,
    mut pushables: Query<&mut Transform, (With<PushableObstacle>, Without<KinematicState>)>,
) {
    if !intents.grab {
        return;
    }
    for (kind, transform, intent, kin) in players.iter() {
        if *kind != ActorKind::Player {
            continue;
        }
        for mut pushable in pushables.iter_mut() {
            let distance = transform.translation.distance(pushable.translation);
            if distance < GRAB_RADIUS {
                pushable.translation += intent.direction * kin.move_speed;
                pushable.translation.y = PUSHABLE_HALF_HEIGHT;
            }
        }
    }
}

/// Система: bounce-препятствия отталкивают игрока (без урона)
pub fn bounce_obstacles(
    mut players: Query<(&ActorKind, &mut Transform), (With<KinematicState>, Without<Dead>)>,
    obstacles: Query<&Transform, (With<BounceObstacle>, Without<KinematicState>)>,
) {
    for (kind, mut transform) in players.iter_mut() {
        if *kind != ActorKind::Player {
            continue;
        }
        for obstacle in obstacles.iter() {
            let distance = transform.translation.distance(obstacle.translation);
            if distance < BOUNCE_RADIUS {
                let direction =
                    (transform.translation - obstacle.translation).normalize_or(Vec3::X);
                transform.translation.x += direction.x * BOUNCE_FORCE;
                transform.translation.z += direction.z * BOUNCE_FORCE;
            }
        }
    }
}

/// Система: clamp всех движущихся объектов к границам поля
pub fn clamp_level_bounds(
    config: Res<SimulationConfig>,
    mut movers: Query<&mut Transform, Or<(With<KinematicState>, With<PushableObstacle>)>>,
) {
    let bound = config.level_half_size;
    for mut transform in movers.iter_mut() {
        transform.translation.x = transform.translation.x.clamp(-bound, bound);
        transform.translation.z = transform.translation.z.clamp(-bound, bound);
    }
}

/// Система: реакция на смерть (EntityDied этого тика)
///
/// Босс/паук: прогресс-счётчик + отложенное удаление трупа.
/// Игрок: отложенный сброс уровня и свежий спавн.
pub fn handle_deaths(
    mut deaths: EventReader<EntityDied>,
    kinds: Query<&ActorKind>,
    tick: Res<SimulationTick>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<DeferredQueue>,
    mut score: ResMut<Score>,
    mut progress: EventWriter<ProgressChanged>,
) {
    for death in deaths.read() {
        let Ok(kind) = kinds.get(death.entity) else {
            continue;
        };
        match kind {
            ActorKind::Player => {
                score.player_deaths += 1;
                progress.write(ProgressChanged {
                    counter: "player_deaths",
                    value: score.player_deaths,
                });
                queue.schedule(
                    tick.0 + config.respawn_delay_ticks,
                    DeferredAction::RespawnPlayer {
                        corpse: death.entity,
                    },
                );
                log_info("player died, respawn scheduled");
            }
            ActorKind::Spider => {
                score.spiders_defeated += 1;
                progress.write(ProgressChanged {
                    counter: "spiders_defeated",
                    value: score.spiders_defeated,
                });
                queue.schedule(
                    tick.0 + config.corpse_removal_ticks,
                    DeferredAction::RemoveCorpse {
                        entity: death.entity,
                    },
                );
            }
            ActorKind::Boss => {
                score.boss_defeats += 1;
                progress.write(ProgressChanged {
                    counter: "boss_defeats",
                    value: score.boss_defeats,
                });
                queue.schedule(
                    tick.0 + config.corpse_removal_ticks,
                    DeferredAction::RemoveCorpse {
                        entity: death.entity,
                    },
                );
            }
        }
    }
}

/// Система: дрейн очереди отложенных действий
///
/// Каждое действие исполняется ровно один раз; действия над despawned
/// entity молча превращаются в no-op.
pub fn drain_deferred(
    mut commands: Commands,
    tick: Res<SimulationTick>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<DeferredQueue>,
    mut movers: Query<&mut KinematicState>,
    corpses: Query<(), With<Dead>>,
    mut pushables: Query<&mut Transform, With<PushableObstacle>>,
) {
    for action in queue.take_due(tick.0) {
        match action {
            DeferredAction::ClearJumpCooldown { entity } => {
                if let Ok(mut kin) = movers.get_mut(entity) {
                    kin.jump_on_cooldown = false;
                }
            }
            DeferredAction::RemoveCorpse { entity } => {
                // Только трупы: живой entity с тем же id не трогаем
                if corpses.get(entity).is_ok() {
                    if let Ok(mut entity_commands) = commands.get_entity(entity) {
                        entity_commands.despawn();
                    }
                }
            }
            DeferredAction::RespawnPlayer { corpse } => {
                if let Ok(mut entity_commands) = commands.get_entity(corpse) {
                    entity_commands.despawn();
                }
                // Сброс уровня: pushable-объекты на исходные позиции
                for mut pushable in pushables.iter_mut() {
                    pushable.translation = config.pushable_spawn_point();
                }
                spawn_player(&mut commands, config.player_spawn_point());
                log_info("player respawned at spawn point");
            }
        }
    }
}
