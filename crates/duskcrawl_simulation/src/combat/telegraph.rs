//! Телеграфированный цикл атаки босса
//!
//! Периодический таймер, независимый от движения: раз в interval кадров
//! attack-объём взводится, кадром позже снимается. Окно экспозиции
//! шириной ровно в один кадр.

use bevy::prelude::*;

use crate::components::{AttackVolume, Dead, TelegraphCycle};

/// Система: тик телеграфа
///
/// Цикл живёт только пока владелец жив: Dead выключает его целиком.
pub fn tick_telegraph(mut query: Query<(&mut TelegraphCycle, &mut AttackVolume), Without<Dead>>) {
    for (mut cycle, mut volume) in query.iter_mut() {
        cycle.timer += 1;
        if cycle.timer >= cycle.interval {
            volume.armed = true;
            cycle.timer = 0;
        } else if cycle.timer == 1 && volume.armed {
            volume.armed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TELEGRAPH_INTERVAL;

    #[test]
    fn test_armed_exactly_one_frame_per_interval() {
        let mut cycle = TelegraphCycle::default();
        let mut armed = false;

        let mut armed_ticks = Vec::new();
        for tick in 1..=(TELEGRAPH_INTERVAL * 2 + 1) {
            cycle.timer += 1;
            if cycle.timer >= cycle.interval {
                armed = true;
                cycle.timer = 0;
            } else if cycle.timer == 1 && armed {
                armed = false;
            }
            if armed {
                armed_ticks.push(tick);
            }
        }

        // Взведён ровно на кадрах 60 и 120, на всех остальных снят
        assert_eq!(armed_ticks, vec![TELEGRAPH_INTERVAL, TELEGRAPH_INTERVAL * 2]);
    }
}
