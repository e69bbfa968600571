//! Chase AI
//!
//! Единственный паттерн подвижного врага: преследование цели до
//! stopping distance. Стационарный вариант (босс) атакует по телеграфу
//! и сюда не попадает — у него нет ChaseIntent.

use bevy::prelude::*;

use crate::components::{ChaseIntent, Dead, KinematicState, MoveIntent};
use crate::SimSet;

/// Система: преследование цели
///
/// - цель despawned или мертва → no-op (intent обнуляется, ошибок нет)
/// - distance > stopping_distance → горизонтальный unit-вектор к цели
///   уходит в MoveIntent (двигает Kinematic Mover, не сама система),
///   yaw разворачивается к цели через atan2
/// - distance <= stopping_distance → стоим на месте
///
/// Дистанция считается в горизонтальной плоскости (разница высот тел
/// не влияет на порог). Граница ровно на пороге — "достаточно близко",
/// строгое `>` для движения.
pub fn chase_targets(
    mut chasers: Query<
        (&ChaseIntent, &mut MoveIntent, &mut Transform),
        (With<KinematicState>, Without<Dead>),
    >,
    targets: Query<&Transform, (Without<ChaseIntent>, Without<Dead>)>,
) {
    for (chase, mut intent, mut transform) in chasers.iter_mut() {
        let Ok(target_transform) = targets.get(chase.target) else {
            intent.direction = Vec3::ZERO;
            continue;
        };

        let to_target = target_transform.translation - transform.translation;
        let planar = Vec3::new(to_target.x, 0.0, to_target.z);
        let distance = planar.length();

        if distance > chase.stopping_distance {
            let direction = planar.normalize_or_zero();
            intent.direction = direction;
            // Ориентация на цель (yaw)
            let angle = direction.x.atan2(direction.z);
            transform.rotation = Quat::from_rotation_y(angle);
        } else {
            intent.direction = Vec3::ZERO;
        }
    }
}

/// AI Plugin
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, chase_targets.in_set(SimSet::Ai));
    }
}
