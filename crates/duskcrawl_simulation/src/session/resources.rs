//! Per-session ресурсы: IntentMap, SimulationTick, DeferredQueue, Score, конфиг
//!
//! Весь межсистемный контекст — явные ресурсы, никаких глобалов: хост
//! кладёт intent map в ресурс перед тиком, все таймеры считаются от
//! SimulationTick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Снимок «intent map» за кадр
///
/// Трансляция физических клавиш в эти имена — забота хоста,
/// ядро читает только булевы намерения.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct IntentMap {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub crawl: bool,
    pub grab: bool,
    pub attack: bool,
    pub jump: bool,
}

impl IntentMap {
    /// Горизонтальное направление из зажатых намерений (normalized, y == 0)
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Счётчик кадров симуляции (frame-counted, не wall-clock)
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimulationTick(pub u64);

/// Отложенное действие, исполняемое очередью на заданном кадре
#[derive(Debug, Clone)]
pub enum DeferredAction {
    /// Сбросить кулдаун прыжка (~500ms после прыжка)
    ClearJumpCooldown { entity: Entity },
    /// Убрать труп с уровня (~1000ms после смерти)
    RemoveCorpse { entity: Entity },
    /// Сброс уровня + свежий игрок в точке спавна (~2000ms после смерти)
    RespawnPlayer { corpse: Entity },
}

#[derive(Debug, Clone)]
struct DeferredEntry {
    due_tick: u64,
    action: DeferredAction,
}

/// Очередь отложенных колбэков, ключ — абсолютный номер кадра
///
/// Дренится раз в тик; каждый entry исполняется ровно один раз.
/// Entity-действия обязаны проверять, что entity ещё существует,
/// и превращаться в no-op для despawned целей.
#[derive(Resource, Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<DeferredEntry>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due_tick: u64, action: DeferredAction) {
        self.entries.push(DeferredEntry { due_tick, action });
    }

    /// Забрать все действия, чей срок наступил
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.entries.retain(|entry| {
            if entry.due_tick <= now {
                due.push(entry.action.clone());
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Прогресс-счётчики сессии (эмитятся наружу через ProgressChanged)
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Score {
    pub spiders_defeated: u32,
    pub boss_defeats: u32,
    pub player_deaths: u32,
}

/// Session-level tuning (сериализуемый, хост может грузить свой)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Полуразмер игрового поля (clamp по x/z)
    pub level_half_size: f32,
    /// Высота пола для headless FlatGround
    pub ground_height: f32,
    /// Точка спавна игрока
    pub player_spawn: [f32; 3],
    /// Точка спавна pushable-объекта (сбрасывается при respawn)
    pub pushable_spawn: [f32; 3],
    /// Кулдаун прыжка в кадрах (~500ms при 60Hz)
    pub jump_cooldown_ticks: u64,
    /// Задержка удаления трупа (~1000ms)
    pub corpse_removal_ticks: u64,
    /// Задержка respawn игрока (~2000ms)
    pub respawn_delay_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            level_half_size: 9.5,
            ground_height: 0.0,
            player_spawn: [0.0, 0.6, 0.0],
            pushable_spawn: [3.0, 0.5, 3.0],
            jump_cooldown_ticks: 30,
            corpse_removal_ticks: 60,
            respawn_delay_ticks: 120,
        }
    }
}

impl SimulationConfig {
    pub fn player_spawn_point(&self) -> Vec3 {
        Vec3::from_array(self.player_spawn)
    }

    pub fn pushable_spawn_point(&self) -> Vec3 {
        Vec3::from_array(self.pushable_spawn)
    }
}
