//! Combat Resolver
//!
//! ECS ответственность:
//! - hit detection: AABB-пересечения attack-объёмов и тел
//! - общий hit-пайплайн: урон, knockback, bounce, смерть (ровно одна)
//! - телеграфированный цикл атаки босса
//!
//! Два независимых источника урона — deliberate strike (armed attack
//! volume) и contact damage (тело с маркером ContactDamage) — идут
//! через один и тот же apply_hits.

use bevy::prelude::*;

pub mod knockback;
pub mod resolve;
pub mod telegraph;

// Re-export основных типов
pub use knockback::tick_knockback;
pub use resolve::{apply_hits, arm_player_attack, HealthChanged, HitLanded, HitSource, EntityDied};
pub use telegraph::tick_telegraph;

use crate::SimSet;

/// Combat Plugin
///
/// Порядок выполнения внутри SimSet::Combat:
/// 1. tick_telegraph — взведение/снятие attack-объёма босса
/// 2. resolve_strike — armed объёмы против тел
/// 3. resolve_contact — контактный урон тел
/// 4. apply_hits — применение урона/knockback/смерти
///
/// tick_knockback идёт в SimSet::Movement: свежий knockback этого тика
/// начинает отсчитываться со следующего кадра.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitLanded>()
            .add_event::<HealthChanged>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            arm_player_attack
                .in_set(SimSet::Input)
                .after(crate::movement::apply_player_intent),
        );
        app.add_systems(
            FixedUpdate,
            tick_knockback
                .in_set(SimSet::Movement)
                .after(crate::movement::advance_kinematics),
        );
        app.add_systems(
            FixedUpdate,
            (
                tick_telegraph,
                resolve::resolve_strike,
                resolve::resolve_contact,
                apply_hits,
            )
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}
