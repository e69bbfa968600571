//! Тиканье knockback-состояния
//!
//! Сдвиг идёт поверх обычного движения и не зависит от input/AI:
//! Mover и Knockback пишут в Transform в разных системах одного тика.

use bevy::prelude::*;

use crate::components::{Dead, Knockback, KNOCKBACK_STEP};

/// Система: покадровый сдвиг по knockback-направлению
///
/// remaining_frames строго убывает на 1 за тик; active снимается
/// ровно в момент достижения нуля. Мёртвые исключены — никакого
/// посмертного отлёта.
pub fn tick_knockback(mut query: Query<(&mut Knockback, &mut Transform), Without<Dead>>) {
    for (mut kb, mut transform) in query.iter_mut() {
        if !kb.active {
            continue;
        }
        transform.translation += kb.direction * KNOCKBACK_STEP;
        kb.remaining_frames -= 1;
        if kb.remaining_frames == 0 {
            kb.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::KNOCKBACK_FRAMES;

    #[test]
    fn test_countdown_clears_exactly_at_zero() {
        let mut kb = Knockback::default();
        kb.begin(Vec3::Z, KNOCKBACK_FRAMES);

        for expected in (0..KNOCKBACK_FRAMES).rev() {
            // Инвариант: пока active, remaining_frames > 0
            assert!(kb.active);
            assert!(kb.remaining_frames > 0);

            kb.remaining_frames -= 1;
            if kb.remaining_frames == 0 {
                kb.active = false;
            }
            assert_eq!(kb.remaining_frames, expected);
        }
        assert!(!kb.active);
    }
}
