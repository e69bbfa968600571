//! Movement компоненты: KinematicState, MoveIntent

use bevy::prelude::*;

use crate::components::CollisionVolume;

/// Скорость ходьбы (units/tick)
pub const WALK_SPEED: f32 = 0.1;
/// Множитель направления в режиме ползания
pub const CRAWL_FACTOR: f32 = 0.3;
/// Скорость пока игрок тащит pushable-объект
pub const GRAB_SPEED: f32 = 0.025;
/// Гравитация (units/tick²)
pub const GRAVITY: f32 = -0.005;
/// Импульс прыжка (units/tick)
pub const JUMP_STRENGTH: f32 = 0.15;

/// Желаемое горизонтальное направление движения (normalized, y == 0)
///
/// Для игрока заполняется из IntentMap, для AI — системой chase.
/// Kinematic Mover читает его каждый тик; сам intent никого не двигает.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveIntent {
    pub direction: Vec3,
}

/// Кинематическое состояние движущегося актора
///
/// Инвариант: vertical_velocity != 0 только пока airborne
/// (плюс один кадр приземления, который его обнуляет).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicState {
    /// Горизонтальная скорость (units/tick)
    pub move_speed: f32,
    /// Вертикальная скорость (units/tick)
    pub vertical_velocity: f32,
    /// Ускорение гравитации (units/tick²)
    pub gravity: f32,
    /// В воздухе ли актор
    pub airborne: bool,
    /// Импульс прыжка
    pub jump_strength: f32,
    /// Прыжок на кулдауне (сбрасывается deferred-callback'ом через ~500ms)
    pub jump_on_cooldown: bool,
    /// Режим ползания
    pub crouching: bool,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            move_speed: WALK_SPEED,
            vertical_velocity: 0.0,
            gravity: GRAVITY,
            airborne: false,
            jump_strength: JUMP_STRENGTH,
            jump_on_cooldown: false,
            crouching: false,
        }
    }
}

impl KinematicState {
    /// Попытка прыжка: no-op на кулдауне, в воздухе и в режиме ползания.
    /// Возвращает true если импульс применён (caller запускает кулдаун).
    pub fn try_jump(&mut self) -> bool {
        if self.jump_on_cooldown || self.airborne || self.crouching {
            return false;
        }
        self.vertical_velocity = self.jump_strength;
        self.airborne = true;
        self.jump_on_cooldown = true;
        true
    }

    /// Вход/выход из режима ползания. Идемпотентно: повторный вход — no-op.
    ///
    /// Вдвое уменьшает высоту collision volume, горизонтальную скорость
    /// и импульс прыжка, на выходе восстанавливает все три.
    pub fn set_crouch(&mut self, volume: &mut CollisionVolume, active: bool) -> bool {
        if self.crouching == active {
            return false;
        }
        self.crouching = active;
        if active {
            volume.half_extents.y *= 0.5;
            self.move_speed *= 0.5;
            self.jump_strength *= 0.5;
        } else {
            volume.half_extents.y *= 2.0;
            self.move_speed *= 2.0;
            self.jump_strength *= 2.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_rejected_on_cooldown() {
        let mut kin = KinematicState::default();

        assert!(kin.try_jump());
        assert!(kin.airborne);
        assert_eq!(kin.vertical_velocity, JUMP_STRENGTH);

        // Кулдаун ещё не сброшен — второй прыжок отклонён
        kin.airborne = false;
        kin.vertical_velocity = 0.0;
        assert!(!kin.try_jump());
        assert_eq!(kin.vertical_velocity, 0.0);

        // Deferred callback сбросил кулдаун
        kin.jump_on_cooldown = false;
        assert!(kin.try_jump());
    }

    #[test]
    fn test_jump_rejected_while_crouching() {
        let mut kin = KinematicState::default();
        let mut volume = CollisionVolume::default();
        kin.set_crouch(&mut volume, true);

        assert!(!kin.try_jump());
    }

    #[test]
    fn test_crouch_idempotent() {
        let mut kin = KinematicState::default();
        let mut volume = CollisionVolume::default();

        assert!(kin.set_crouch(&mut volume, true));
        let half_y = volume.half_extents.y;
        let speed = kin.move_speed;
        let jump = kin.jump_strength;

        // Повторный вход — no-op, размеры не уменьшаются второй раз
        assert!(!kin.set_crouch(&mut volume, true));
        assert_eq!(volume.half_extents.y, half_y);
        assert_eq!(kin.move_speed, speed);
        assert_eq!(kin.jump_strength, jump);

        // Выход восстанавливает исходные значения
        assert!(kin.set_crouch(&mut volume, false));
        assert_eq!(volume.half_extents.y, 0.6);
        assert_eq!(kin.move_speed, WALK_SPEED);
        assert_eq!(kin.jump_strength, JUMP_STRENGTH);
    }

    #[test]
    fn test_crouch_halves_speed() {
        let mut kin = KinematicState::default();
        let mut volume = CollisionVolume::default();

        kin.set_crouch(&mut volume, true);
        assert_eq!(kin.move_speed, WALK_SPEED * 0.5);
        assert_eq!(kin.jump_strength, JUMP_STRENGTH * 0.5);

        kin.set_crouch(&mut volume, false);
        assert_eq!(kin.move_speed, WALK_SPEED);
    }
}
