//! Статические объекты уровня: BounceObstacle, PushableObstacle

use bevy::prelude::*;

/// Радиус, внутри которого bounce-препятствие отталкивает игрока
pub const BOUNCE_RADIUS: f32 = 1.0;
/// Радиус захвата pushable-объекта
pub const GRAB_RADIUS: f32 = 1.5;

/// Препятствие, отталкивающее игрока при сближении (без урона)
///
/// Декоративные объекты уровня, сквозь которые нельзя пройти:
/// подойдя ближе BOUNCE_RADIUS, игрок получает горизонтальный сдвиг
/// от центра препятствия.
#[derive(Component, Debug, Default)]
pub struct BounceObstacle;

/// Объект, который игрок может толкать, удерживая intent "grab"
///
/// Пока игрок держит grab рядом с объектом, его скорость падает до
/// GRAB_SPEED, а объект движется в направлении движения игрока.
#[derive(Component, Debug, Default)]
pub struct PushableObstacle;
