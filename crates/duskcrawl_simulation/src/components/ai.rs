//! AI компоненты: ChaseIntent

use bevy::prelude::*;

/// Дистанция, ближе которой преследователь останавливается
pub const STOPPING_DISTANCE: f32 = 2.0;

/// Намерение преследовать цель
///
/// target — слабая ссылка: AI не владеет целью, и если она despawned
/// (или мертва), chase обязан тихо превращаться в no-op.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChaseIntent {
    pub target: Entity,
    pub stopping_distance: f32,
}

impl ChaseIntent {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            stopping_distance: STOPPING_DISTANCE,
        }
    }
}
