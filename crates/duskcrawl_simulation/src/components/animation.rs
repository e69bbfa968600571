//! Animation компоненты: AnimClip, ClipLibrary, AnimationState

use std::collections::HashMap;

use bevy::prelude::*;

use crate::logger::log_warning;

/// Именованные состояния анимации
///
/// Idle — начальное состояние и fallback, когда у запрошенного клипа
/// нет playback'а в библиотеке.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AnimClip {
    #[default]
    Idle,
    Walking,
    Jumping,
    Crouching,
    Attacking,
}

/// Библиотека клипов: длительность playback'а в кадрах
///
/// Презентационный слой может переопределить ресурс своими длинами;
/// ядру важен только момент завершения non-looping клипа.
#[derive(Resource, Debug, Clone)]
pub struct ClipLibrary {
    frames: HashMap<AnimClip, u32>,
}

impl Default for ClipLibrary {
    fn default() -> Self {
        let mut frames = HashMap::new();
        frames.insert(AnimClip::Idle, 1);
        frames.insert(AnimClip::Walking, 20);
        frames.insert(AnimClip::Jumping, 30);
        frames.insert(AnimClip::Crouching, 15);
        frames.insert(AnimClip::Attacking, 20);
        Self { frames }
    }
}

impl ClipLibrary {
    pub fn playback(&self, clip: AnimClip) -> Option<u32> {
        self.frames.get(&clip).copied()
    }

    /// Убрать клип из библиотеки (хост без такого ассета)
    pub fn remove(&mut self, clip: AnimClip) {
        self.frames.remove(&clip);
    }
}

/// Координатор состояния анимации, один на анимированного Mover'а
///
/// Машина без терминального состояния: живёт весь lifetime entity
/// и уничтожается вместе с ним.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AnimationState {
    pub current: AnimClip,
    /// true пока non-repeating действие (jump, crouch-enter, attack)
    /// проигрывается; intent-переходы в Walking/Idle подавлены
    pub locked: bool,
    playing: bool,
    looped: bool,
    frames_left: u32,
    /// Трекинг перехода "стоял → пошёл" для movement integration
    pub moving_latch: bool,
}

impl AnimationState {
    /// Запрос перехода в новое состояние.
    ///
    /// - Тот же клип уже играет → no-op (не рестартует playback и не
    ///   планирует второй completion).
    /// - Пока locked: Walking/Idle подавлены, повторный вход в текущий
    ///   залоченный клип игнорируется.
    /// - Клип без playback'а → fallback в Idle + warning, тик не блокируется.
    pub fn request(&mut self, clips: &ClipLibrary, clip: AnimClip, looped: bool) {
        if self.locked {
            if clip == self.current {
                return;
            }
            if matches!(clip, AnimClip::Walking | AnimClip::Idle) {
                return;
            }
        }
        if clip == self.current && self.playing {
            return;
        }

        match clips.playback(clip) {
            Some(frames) => {
                self.current = clip;
                self.playing = true;
                self.looped = looped;
                self.frames_left = frames;
                self.locked = !looped;
            }
            None => {
                log_warning(&format!(
                    "animation clip {:?} has no playback, falling back to Idle",
                    clip
                ));
                self.fall_back_to_idle();
            }
        }
    }

    /// Один кадр playback'а. Завершение non-looping клипа срабатывает
    /// ровно один раз и возвращает машину в Idle.
    pub fn tick(&mut self, clips: &ClipLibrary) {
        if !self.playing || self.looped {
            return;
        }
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.locked = false;
            self.playing = false;
            self.request(clips, AnimClip::Idle, true);
        }
    }

    fn fall_back_to_idle(&mut self) {
        self.current = AnimClip::Idle;
        self.playing = true;
        self.looped = true;
        self.locked = false;
    }

    #[cfg(test)]
    pub(crate) fn frames_left(&self) -> u32 {
        self.frames_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_rerequest_does_not_restart() {
        let clips = ClipLibrary::default();
        let mut anim = AnimationState::default();

        anim.request(&clips, AnimClip::Jumping, false);
        assert!(anim.locked);
        assert_eq!(anim.frames_left(), 30);

        anim.tick(&clips);
        assert_eq!(anim.frames_left(), 29);

        // Повторный запрос того же залоченного клипа — игнорируется
        anim.request(&clips, AnimClip::Jumping, false);
        assert_eq!(anim.frames_left(), 29);
        assert_eq!(anim.current, AnimClip::Jumping);
    }

    #[test]
    fn test_completion_returns_to_idle_once() {
        let clips = ClipLibrary::default();
        let mut anim = AnimationState::default();

        anim.request(&clips, AnimClip::Attacking, false);
        for _ in 0..20 {
            assert_eq!(anim.current, AnimClip::Attacking);
            anim.tick(&clips);
        }
        assert_eq!(anim.current, AnimClip::Idle);
        assert!(!anim.locked);

        // Дальнейшие тики Idle (looped) ничего не меняют
        anim.tick(&clips);
        assert_eq!(anim.current, AnimClip::Idle);
    }

    #[test]
    fn test_intent_transitions_suppressed_while_locked() {
        let clips = ClipLibrary::default();
        let mut anim = AnimationState::default();

        anim.request(&clips, AnimClip::Jumping, false);
        anim.request(&clips, AnimClip::Walking, false);
        assert_eq!(anim.current, AnimClip::Jumping);

        anim.request(&clips, AnimClip::Idle, true);
        assert_eq!(anim.current, AnimClip::Jumping);
    }

    #[test]
    fn test_missing_clip_falls_back_to_idle() {
        let mut clips = ClipLibrary::default();
        clips.remove(AnimClip::Crouching);

        let mut anim = AnimationState::default();
        anim.request(&clips, AnimClip::Crouching, false);

        assert_eq!(anim.current, AnimClip::Idle);
        assert!(!anim.locked);
    }
}
