//! Базовые компоненты акторов: ActorKind, Health, CollisionVolume, Dead

use bevy::prelude::*;

/// Вариант актора (закрытое множество — никаких duck-typed "any")
///
/// Поведенческий диспатч по варианту только там, где поведение реально
/// различается (input у игрока, death handling). Всё остальное —
/// capability-компоненты (Health, KinematicState, ChaseIntent, ...).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum ActorKind {
    /// Игрок (управляется IntentMap)
    Player,
    /// Паук — быстрый melee, преследует игрока, урон контактом
    Spider,
    /// Босс — стационарный, телеграфированная атака по таймеру
    Boss,
}

impl ActorKind {
    /// Враждебен ли актор игроку (заменяет faction check)
    pub fn is_hostile(&self) -> bool {
        !matches!(self, ActorKind::Player)
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Мертвый entity исключён из ВСЕХ систем симуляции (движение, combat
/// входящий и исходящий, AI, telegraph) через фильтр `Without<Dead>`.
/// Respawn создаёт новый entity, а не воскрешает старый.
#[derive(Component, Debug)]
pub struct Dead;

/// AABB-объём для коллизий с миром и как hitbox защищающегося
///
/// Размеры фиксируются при спавне (исключение — crouch, который
/// временно вдвое уменьшает высоту). Центр объёма — Transform entity,
/// так что "синхронизация позиции" происходит сама собой.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CollisionVolume {
    pub half_extents: Vec3,
}

impl CollisionVolume {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

impl Default for CollisionVolume {
    fn default() -> Self {
        // Сфера персонажа диаметром 1.2 → куб с half extents 0.6
        Self::new(Vec3::splat(0.6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_clamps_at_zero() {
        let mut health = Health::new(10);
        assert_eq!(health.current, 10);

        health.take_damage(3);
        assert_eq!(health.current, 7);
        assert!(health.is_alive());

        health.take_damage(100); // saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_hostility() {
        assert!(!ActorKind::Player.is_hostile());
        assert!(ActorKind::Spider.is_hostile());
        assert!(ActorKind::Boss.is_hostile());
    }
}
