//! Hit detection и общий hit-пайплайн
//!
//! Detect-системы только читают геометрию и пишут HitLanded события;
//! все мутации (health, knockback, bounce, Dead) — в apply_hits.
//! Направление knockback считается на этапе detect, пока обе позиции
//! доступны на чтение.

use bevy::prelude::*;

use crate::components::{
    ActorKind, AnimClip, AnimationState, AttackVolume, ClipLibrary, CollisionVolume, ContactDamage,
    Dead, Health, Knockback, BOUNCE_FORCE, HIT_DAMAGE, KNOCKBACK_FRAMES,
};
use crate::logger::log_info;
use crate::session::IntentMap;
use crate::world::aabb_intersects;

/// Источник попадания (для дебага/логов; механика общая)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    /// armed attack-объём против тела
    Strike,
    /// касание тела с ContactDamage
    Contact,
}

/// Событие: попадание зафиксировано, ждёт применения
#[derive(Event, Debug, Clone)]
pub struct HitLanded {
    pub attacker: Entity,
    pub defender: Entity,
    /// Горизонтальный единичный вектор defender − attacker
    pub direction: Vec3,
    pub source: HitSource,
}

/// Событие: здоровье изменилось (нотификация для UI)
#[derive(Event, Debug, Clone)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Событие: entity умер (health достиг 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: armed у игрока привязан к удержанию intent "attack"
pub fn arm_player_attack(
    intents: Res<IntentMap>,
    clips: Res<ClipLibrary>,
    mut players: Query<(&ActorKind, &mut AttackVolume, &mut AnimationState), Without<Dead>>,
) {
    for (kind, mut volume, mut anim) in players.iter_mut() {
        if *kind != ActorKind::Player {
            continue;
        }
        if intents.attack {
            if !volume.armed {
                volume.armed = true;
                anim.request(&clips, AnimClip::Attacking, false);
            }
        } else {
            volume.armed = false;
        }
    }
}

/// Система: deliberate strike — armed attack-объёмы против тел
///
/// Пара qualifies только если стороны по разные стороны вражды
/// (игрок ↔ hostile); защищающийся с активным knockback'ом временно
/// исключён — удержанный объём не молотит 60 раз в секунду.
pub fn resolve_strike(
    attackers: Query<(Entity, &ActorKind, &Transform, &AttackVolume), Without<Dead>>,
    defenders: Query<
        (Entity, &ActorKind, &Transform, &CollisionVolume, &Health, &Knockback),
        Without<Dead>,
    >,
    mut hits: EventWriter<HitLanded>,
) {
    for (attacker, attacker_kind, attacker_transform, attack_volume) in attackers.iter() {
        if !attack_volume.armed {
            continue;
        }
        let volume_center = attacker_transform.translation + attack_volume.offset;

        for (defender, defender_kind, defender_transform, body, health, kb) in defenders.iter() {
            if !qualifies(attacker, attacker_kind, defender, defender_kind, health, kb) {
                continue;
            }
            if aabb_intersects(
                volume_center,
                attack_volume.half_extents,
                defender_transform.translation,
                body.half_extents,
            ) {
                hits.write(HitLanded {
                    attacker,
                    defender,
                    direction: planar_direction(
                        attacker_transform.translation,
                        defender_transform.translation,
                    ),
                    source: HitSource::Strike,
                });
            }
        }
    }
}

/// Система: contact damage — тело с ContactDamage против тел (без armed)
pub fn resolve_contact(
    attackers: Query<
        (Entity, &ActorKind, &Transform, &CollisionVolume),
        (With<ContactDamage>, Without<Dead>),
    >,
    defenders: Query<
        (Entity, &ActorKind, &Transform, &CollisionVolume, &Health, &Knockback),
        Without<Dead>,
    >,
    mut hits: EventWriter<HitLanded>,
) {
    for (attacker, attacker_kind, attacker_transform, attacker_body) in attackers.iter() {
        for (defender, defender_kind, defender_transform, body, health, kb) in defenders.iter() {
            if !qualifies(attacker, attacker_kind, defender, defender_kind, health, kb) {
                continue;
            }
            if aabb_intersects(
                attacker_transform.translation,
                attacker_body.half_extents,
                defender_transform.translation,
                body.half_extents,
            ) {
                hits.write(HitLanded {
                    attacker,
                    defender,
                    direction: planar_direction(
                        attacker_transform.translation,
                        defender_transform.translation,
                    ),
                    source: HitSource::Contact,
                });
            }
        }
    }
}

/// Система: применение накопленных попаданий
///
/// Повторные попадания по уже умершему (или только что отброшенному)
/// в этом же тике отбрасываются здесь — смерть случается ровно один раз.
pub fn apply_hits(
    mut commands: Commands,
    mut hits: EventReader<HitLanded>,
    mut defenders: Query<(&mut Health, &mut Knockback, &mut Transform), Without<Dead>>,
    mut health_events: EventWriter<HealthChanged>,
    mut death_events: EventWriter<EntityDied>,
) {
    for hit in hits.read() {
        let Ok((mut health, mut kb, mut transform)) = defenders.get_mut(hit.defender) else {
            continue;
        };
        if !health.is_alive() || kb.active {
            continue;
        }

        health.take_damage(HIT_DAMAGE);
        health_events.write(HealthChanged {
            entity: hit.defender,
            current: health.current,
            max: health.max,
        });

        kb.begin(hit.direction, KNOCKBACK_FRAMES);
        // Мгновенный bounce в кадр попадания, поверх многокадрового knockback
        transform.translation += hit.direction * BOUNCE_FORCE;

        if !health.is_alive() {
            if let Ok(mut entity_commands) = commands.get_entity(hit.defender) {
                entity_commands.insert(Dead);
            }
            death_events.write(EntityDied {
                entity: hit.defender,
                killer: Some(hit.attacker),
            });
            log_info(&format!(
                "entity {:?} killed by {:?} ({:?})",
                hit.defender, hit.attacker, hit.source
            ));
        }
    }
}

/// Пара attacker/defender проходит в пайплайн?
fn qualifies(
    attacker: Entity,
    attacker_kind: &ActorKind,
    defender: Entity,
    defender_kind: &ActorKind,
    health: &Health,
    kb: &Knockback,
) -> bool {
    attacker != defender
        && attacker_kind.is_hostile() != defender_kind.is_hostile()
        && health.is_alive()
        && !kb.active
}

/// Горизонтальный единичный вектор от attacker к defender
fn planar_direction(attacker: Vec3, defender: Vec3) -> Vec3 {
    let delta = defender - attacker;
    Vec3::new(delta.x, 0.0, delta.z).normalize_or(Vec3::X)
}
