//! DUSKCRAWL Simulation Core
//!
//! Per-frame ядро third-person action/platformer'а: кинематика с
//! гравитацией и step-snapping'ом, melee combat через пересечение
//! объёмов, chase AI, телеграфированные атаки босса, knockback,
//! health/death/respawn и координация animation state.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay layer (state, combat rules, таймеры, AI)
//! - Хост = tactical layer (рендер, collision substrate через
//!   WorldCollision service, raw input → IntentMap)

use bevy::prelude::*;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod logger;
pub mod movement;
pub mod session;
pub mod world;

// Re-export базовых типов для удобства
pub use ai::AIPlugin;
pub use animation::AnimationPlugin;
pub use combat::{CombatPlugin, EntityDied, HealthChanged, HitLanded, HitSource};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_logger, LogPrinter};
pub use movement::MovementPlugin;
pub use session::{
    spawn_boss, spawn_bounce_obstacle, spawn_player, spawn_pushable, spawn_spider,
    DeferredAction, DeferredQueue, IntentMap, ProgressChanged, Score, SessionPlugin,
    SimulationConfig, SimulationTick,
};
pub use world::{aabb_intersects, FlatGround, RayHit, WorldCollision, WorldGeometry};

/// Частота симуляции (тиков в секунду)
pub const TICK_RATE_HZ: f64 = 60.0;

/// Фазы одного тика симуляции
///
/// Порядок обязателен: движение до combat (никаких хитов по устаревшим
/// позициям), combat до анимации, всё — до удаления entity.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Счётчик кадров
    Tick,
    /// Intent игрока → компоненты
    Input,
    /// Kinematic Mover + knockback + препятствия + границы
    Movement,
    /// Chase AI (пишет intents на следующий кадр)
    Ai,
    /// Telegraph + hit detection + применение урона
    Combat,
    /// Сверка animation state
    Animation,
    /// Реакция на смерть + deferred queue
    Session,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ));

        if !app.world().contains_resource::<SimulationConfig>() {
            app.insert_resource(SimulationConfig::default());
        }
        // Хост может подставить свой collision substrate до SimulationPlugin
        if !app.world().contains_resource::<WorldGeometry>() {
            let height = app.world().resource::<SimulationConfig>().ground_height;
            app.insert_resource(WorldGeometry::flat(height));
        }

        app.init_resource::<IntentMap>()
            .init_resource::<SimulationTick>()
            .init_resource::<DeferredQueue>()
            .init_resource::<Score>()
            .init_resource::<ClipLibrary>();

        app.configure_sets(
            FixedUpdate,
            (
                SimSet::Tick,
                SimSet::Input,
                SimSet::Movement,
                SimSet::Ai,
                SimSet::Combat,
                SimSet::Animation,
                SimSet::Session,
            )
                .chain(),
        );

        app.add_plugins((
            MovementPlugin,
            CombatPlugin,
            AIPlugin,
            AnimationPlugin,
            SessionPlugin,
        ));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: SimulationConfig) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Один детерминированный тик симуляции
///
/// Гоняет FixedUpdate напрямую, минуя wall-clock аккумулятор — тесты
/// и headless-прогоны считают кадры, а не миллисекунды.
pub fn step(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
    update_events(app.world_mut());
}

// Ручная ротация event-буферов: без полного app.update() их никто
// не чистит, а все читатели уже отработали внутри тика
fn update_events(world: &mut World) {
    world.resource_mut::<Events<HitLanded>>().update();
    world.resource_mut::<Events<HealthChanged>>().update();
    world.resource_mut::<Events<EntityDied>>().update();
    world.resource_mut::<Events<ProgressChanged>>().update();
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты в детерминированном порядке (сортировка по Entity ID),
/// сериализация через Debug — достаточно для сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
