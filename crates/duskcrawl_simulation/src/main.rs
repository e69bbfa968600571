//! Headless симуляция DUSKCRAWL
//!
//! Запускает ядро без рендера: игрок под простым скриптом намерений,
//! паук преследует, босс телеграфирует.

use bevy::prelude::*;
use duskcrawl_simulation::*;

fn main() {
    println!("Starting DUSKCRAWL headless simulation");

    let config = SimulationConfig::default();
    let mut app = create_headless_app(config.clone());

    let player = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, config.player_spawn_point());
        spawn_spider(&mut commands, Vec3::new(5.0, 0.25, 5.0), player);
        spawn_boss(&mut commands, Vec3::new(-6.0, 0.25, 0.0));
        spawn_pushable(&mut commands, config.pushable_spawn_point());
        spawn_bounce_obstacle(&mut commands, Vec3::new(5.0, 1.3, 0.0));
        spawn_bounce_obstacle(&mut commands, Vec3::new(-5.0, 1.3, 0.0));
        spawn_bounce_obstacle(&mut commands, Vec3::new(0.0, 1.3, 5.0));
        player
    };
    app.world_mut().flush();

    // Прогоняем 600 тиков (10 секунд при 60Hz): игрок идёт вперёд и машет
    app.world_mut().resource_mut::<IntentMap>().forward = true;
    app.world_mut().resource_mut::<IntentMap>().attack = true;

    for tick in 0..600 {
        step(&mut app);

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            let health = app
                .world()
                .get::<Health>(player)
                .map(|h| h.current)
                .unwrap_or(0);
            println!(
                "Tick {}: {} entities, player health {}",
                tick, entity_count, health
            );
        }
    }

    let score = *app.world().resource::<Score>();
    println!(
        "Simulation complete: {} spiders defeated, {} boss defeats, {} player deaths",
        score.spiders_defeated, score.boss_defeats, score.player_deaths
    );
}
