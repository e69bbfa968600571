//! Combat компоненты: AttackVolume, Knockback, TelegraphCycle, ContactDamage

use bevy::prelude::*;

/// Урон за одно попадание (общий для strike и contact damage)
pub const HIT_DAMAGE: u32 = 1;
/// Длительность knockback в кадрах
pub const KNOCKBACK_FRAMES: u32 = 10;
/// Мгновенный сдвиг в кадр попадания (units)
pub const BOUNCE_FORCE: f32 = 0.5;
/// Сдвиг за кадр пока knockback активен (units/tick)
pub const KNOCKBACK_STEP: f32 = 0.05;
/// Период телеграфа босса (кадры, ~1 секунда при 60Hz)
pub const TELEGRAPH_INTERVAL: u32 = 60;

/// Атакующий AABB-объём, прикреплённый к владельцу
///
/// Центр = позиция владельца + offset, синхронизируется каждый кадр.
/// armed у игрока привязан к удержанию intent "attack",
/// у босса — к TelegraphCycle. Для движения объём не используется.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AttackVolume {
    pub armed: bool,
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl AttackVolume {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            armed: false,
            half_extents,
            offset: Vec3::ZERO,
        }
    }
}

/// Маркер: тело entity наносит урон при касании (без armed-гейта)
///
/// Proximity-атаки паука и босса. Сам strike-пайплайн тот же,
/// отличается только проверка, которая его запускает.
#[derive(Component, Debug)]
pub struct ContactDamage;

/// Направленный сдвиг по таймеру, независимый от input
///
/// Инвариант: пока active, remaining_frames > 0; на нуле active сбрасывается.
/// direction — единичный вектор в горизонтальной плоскости (y == 0).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Knockback {
    pub active: bool,
    pub remaining_frames: u32,
    pub direction: Vec3,
}

impl Knockback {
    pub fn begin(&mut self, direction: Vec3, frames: u32) {
        self.active = true;
        self.remaining_frames = frames;
        self.direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or(Vec3::X);
    }
}

/// Периодический цикл телеграфированной атаки босса
///
/// Каждый кадр counter++; на interval объём взводится и counter
/// сбрасывается; на counter == 1 объём снимается. Окно экспозиции —
/// ровно один кадр.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TelegraphCycle {
    pub timer: u32,
    pub interval: u32,
}

impl Default for TelegraphCycle {
    fn default() -> Self {
        Self {
            timer: 0,
            interval: TELEGRAPH_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knockback_direction_is_planar_unit() {
        let mut kb = Knockback::default();
        kb.begin(Vec3::new(3.0, 5.0, 4.0), KNOCKBACK_FRAMES);

        assert!(kb.active);
        assert_eq!(kb.remaining_frames, KNOCKBACK_FRAMES);
        assert_eq!(kb.direction.y, 0.0);
        assert!((kb.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_knockback_degenerate_direction_falls_back() {
        // Атакующий и защищающийся в одной точке — normalize(0) запрещён
        let mut kb = Knockback::default();
        kb.begin(Vec3::ZERO, KNOCKBACK_FRAMES);

        assert_eq!(kb.direction, Vec3::X);
    }
}
