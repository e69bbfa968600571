//! Kinematic Mover
//!
//! Интеграция гравитации, прыжков, горизонтального движения и step-down
//! snapping'а. Вся геометрия уходит в сервис WorldCollision: ядро не
//! разрешает коллизии само, оно отправляет "сдвинь объём на delta"
//! и работает с фактической позицией из ответа.

use bevy::prelude::*;

use crate::components::{
    ActorKind, AnimClip, AnimationState, ClipLibrary, CollisionVolume, Dead, KinematicState,
    MoveIntent, CRAWL_FACTOR,
};
use crate::session::{DeferredAction, DeferredQueue, IntentMap, SimulationConfig, SimulationTick};
use crate::world::WorldGeometry;
use crate::SimSet;

/// Длина луча grounded-проверки (длиннее тела, см. gate по спуску)
pub const GROUND_RAY_LENGTH: f32 = 1.2;
/// Допуск: grounded если foot в пределах epsilon от точки попадания
pub const GROUND_EPSILON: f32 = 0.05;
/// Порог зазора, после которого включается step-down snap
pub const STEP_SNAP_THRESHOLD: f32 = 0.2;
/// Величина snap-сдвига вниз
pub const STEP_SNAP_INCREMENT: f32 = 0.3;
/// Запас короткого step-луча ниже foot
pub const STEP_RAY_REACH: f32 = 0.5;

/// Система: intent игрока → MoveIntent + jump/crouch операции
///
/// Прыжок на успехе ставит кулдаун и планирует его сброс через
/// DeferredQueue (jump_cooldown_ticks кадров); мгновенного "таймера
/// в компоненте" нет — все отложенные эффекты идут одной очередью.
pub fn apply_player_intent(
    intents: Res<IntentMap>,
    tick: Res<SimulationTick>,
    config: Res<SimulationConfig>,
    clips: Res<ClipLibrary>,
    mut queue: ResMut<DeferredQueue>,
    mut players: Query<
        (
            Entity,
            &ActorKind,
            &mut MoveIntent,
            &mut KinematicState,
            &mut CollisionVolume,
            &mut AnimationState,
        ),
        Without<Dead>,
    >,
) {
    for (entity, kind, mut intent, mut kin, mut volume, mut anim) in players.iter_mut() {
        if *kind != ActorKind::Player {
            continue;
        }

        intent.direction = intents.direction();

        if kin.set_crouch(&mut volume, intents.crawl) && intents.crawl {
            anim.request(&clips, AnimClip::Crouching, false);
        }

        if intents.jump && kin.try_jump() {
            queue.schedule(
                tick.0 + config.jump_cooldown_ticks,
                DeferredAction::ClearJumpCooldown { entity },
            );
            anim.request(&clips, AnimClip::Jumping, false);
        }
    }
}

/// Система: продвижение кинематики всех Mover'ов
///
/// Порядок внутри кадра:
/// 1. горизонтальный сдвиг через move_with_collision (crouch масштабирует
///    направление на CRAWL_FACTOR до умножения на скорость)
/// 2. step-down snapping по короткому лучу вниз
/// 3. grounded-проверка, интеграция гравитации пока airborne
pub fn advance_kinematics(
    geometry: Res<WorldGeometry>,
    mut movers: Query<
        (&MoveIntent, &mut KinematicState, &CollisionVolume, &mut Transform),
        Without<Dead>,
    >,
) {
    for (intent, mut kin, volume, mut transform) in movers.iter_mut() {
        let mut position = transform.translation;

        // Горизонтальный сдвиг
        let mut direction = intent.direction;
        if kin.crouching {
            direction *= CRAWL_FACTOR;
        }
        if direction.length_squared() > f32::EPSILON {
            position = geometry.move_with_collision(volume, position, direction * kin.move_speed);
        }

        // Step-down snapping: каждый movement-тик, но не во время подъёма —
        // snap против восходящего импульса гасил бы прыжок на втором кадре
        if kin.vertical_velocity <= 0.0 {
            let ray_length = volume.half_extents.y + STEP_RAY_REACH;
            if let Some(hit) = geometry.cast_downward_ray(position, ray_length) {
                let foot = position.y - volume.half_extents.y;
                if foot - hit.point.y > STEP_SNAP_THRESHOLD {
                    position = geometry.move_with_collision(
                        volume,
                        position,
                        Vec3::new(0.0, -STEP_SNAP_INCREMENT, 0.0),
                    );
                }
            }
        }

        // Актор без опоры под ногами просто продолжает падать
        // (kill plane не в зоне ответственности ядра)
        if !kin.airborne && !grounded(&geometry, volume, position) {
            kin.airborne = true;
        }

        if kin.airborne {
            kin.vertical_velocity += kin.gravity;
            position = geometry.move_with_collision(
                volume,
                position,
                Vec3::new(0.0, kin.vertical_velocity, 0.0),
            );
            // Приземление учитываем только на нисходящей ветке,
            // иначе grounded-луч обрывал бы прыжок на первом кадре
            if kin.vertical_velocity <= 0.0 && grounded(&geometry, volume, position) {
                kin.airborne = false;
                kin.vertical_velocity = 0.0;
            }
        }

        transform.translation = position;
    }
}

/// Grounded: луч вниз попал, и foot в пределах epsilon от поверхности
fn grounded(geometry: &WorldGeometry, volume: &CollisionVolume, position: Vec3) -> bool {
    geometry
        .cast_downward_ray(position, GROUND_RAY_LENGTH)
        .map(|hit| (position.y - volume.half_extents.y) - hit.point.y <= GROUND_EPSILON)
        .unwrap_or(false)
}

/// Movement Plugin
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_player_intent.in_set(SimSet::Input));
        app.add_systems(FixedUpdate, advance_kinematics.in_set(SimSet::Movement));
    }
}
