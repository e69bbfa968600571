//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (ActorKind, Health, CollisionVolume, Dead)
//! - movement: кинематика (KinematicState, MoveIntent)
//! - combat: боевая механика (AttackVolume, Knockback, TelegraphCycle, ContactDamage)
//! - ai: преследование цели (ChaseIntent)
//! - animation: состояние анимации (AnimationState, AnimClip, ClipLibrary)
//! - world: статические объекты уровня (BounceObstacle, PushableObstacle)

pub mod actor;
pub mod ai;
pub mod animation;
pub mod combat;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use animation::*;
pub use combat::*;
pub use movement::*;
pub use world::*;
