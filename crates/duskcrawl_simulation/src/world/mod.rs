//! Граница с collision substrate'ом
//!
//! Ядро не свипает объёмы и не кастует лучи само: оно отдаёт запрос
//! сервису WorldCollision ("подвинь объём с разрешением коллизий",
//! "кинь луч вниз") и работает с результатом. Реализация живёт у хоста
//! (рендер/физика); для headless-прогонов и тестов здесь есть FlatGround.

use bevy::prelude::*;

use crate::components::CollisionVolume;

/// Результат ray cast'а вниз
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Ближайшая точка попадания
    pub point: Vec3,
    /// Подсказка нормали поверхности (хост может вернуть Vec3::Y)
    pub normal: Vec3,
}

/// Контракт collision substrate'а
pub trait WorldCollision: Send + Sync {
    /// Сдвинуть объём на delta с разрешением против статической геометрии.
    /// Возвращает фактическую позицию после collision response.
    fn move_with_collision(&self, volume: &CollisionVolume, from: Vec3, delta: Vec3) -> Vec3;

    /// Луч вниз из origin длиной max_distance; None если попаданий нет.
    fn cast_downward_ray(&self, origin: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Resource-обёртка над сервисом коллизий
#[derive(Resource)]
pub struct WorldGeometry(pub Box<dyn WorldCollision>);

impl WorldGeometry {
    /// Плоский пол на заданной высоте (headless/тесты)
    pub fn flat(height: f32) -> Self {
        Self(Box::new(FlatGround { height }))
    }
}

impl std::ops::Deref for WorldGeometry {
    type Target = dyn WorldCollision;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Простейший мир: бесконечный плоский пол
///
/// Аналог заглушки ground check'а до подключения полного substrate'а:
/// движение вниз упирается в пол, луч вниз всегда попадает в plane.
pub struct FlatGround {
    pub height: f32,
}

impl WorldCollision for FlatGround {
    fn move_with_collision(&self, volume: &CollisionVolume, from: Vec3, delta: Vec3) -> Vec3 {
        let mut to = from + delta;
        let floor = self.height + volume.half_extents.y;
        if to.y < floor {
            to.y = floor;
        }
        to
    }

    fn cast_downward_ray(&self, origin: Vec3, max_distance: f32) -> Option<RayHit> {
        if origin.y - self.height <= max_distance {
            Some(RayHit {
                point: Vec3::new(origin.x, self.height, origin.z),
                normal: Vec3::Y,
            })
        } else {
            None
        }
    }
}

/// Пересечение двух axis-aligned box'ов
pub fn aabb_intersects(center_a: Vec3, half_a: Vec3, center_b: Vec3, half_b: Vec3) -> bool {
    (center_a.x - center_b.x).abs() <= half_a.x + half_b.x
        && (center_a.y - center_b.y).abs() <= half_a.y + half_b.y
        && (center_a.z - center_b.z).abs() <= half_a.z + half_b.z
}
