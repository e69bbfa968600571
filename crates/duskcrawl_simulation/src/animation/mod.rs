//! Animation State Coordinator (системная часть)
//!
//! Логика переходов живёт в AnimationState (components/animation.rs);
//! здесь — покадровая сверка с movement intent и тиканье playback'ов.
//! Координатор идёт после combat: смерть этого тика уже видна через Dead.

use bevy::prelude::*;

use crate::components::{AnimClip, AnimationState, ClipLibrary, Dead, MoveIntent};
use crate::SimSet;

/// Система: сверка анимации с движением
///
/// Старт движения → non-looping пульс Walking; остановка при
/// отсутствии lock'а → Idle. Пока lock держится, запросы подавляются
/// внутри AnimationState::request.
pub fn reconcile_movement_animation(
    clips: Res<ClipLibrary>,
    mut query: Query<(&MoveIntent, &mut AnimationState), Without<Dead>>,
) {
    for (intent, mut anim) in query.iter_mut() {
        let moving = intent.direction.length_squared() > 1e-6;
        if moving && !anim.moving_latch {
            anim.request(&clips, AnimClip::Walking, false);
        }
        if !moving && anim.moving_latch && !anim.locked {
            anim.request(&clips, AnimClip::Idle, true);
        }
        anim.moving_latch = moving;
    }
}

/// Система: тиканье playback'ов (завершение non-looping клипов)
pub fn tick_animations(
    clips: Res<ClipLibrary>,
    mut query: Query<&mut AnimationState, Without<Dead>>,
) {
    for mut anim in query.iter_mut() {
        anim.tick(&clips);
    }
}

/// Animation Plugin
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (reconcile_movement_animation, tick_animations)
                .chain()
                .in_set(SimSet::Animation),
        );
    }
}
