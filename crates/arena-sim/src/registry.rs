//! Entity registry: owns every dynamic entity and the level's obstacles.
//!
//! Enemies, bullets, and powerups live in a hecs `World`, each tagged with an
//! `EntityId` from a monotonically increasing counter. hecs does not keep
//! insertion order across despawns, so every listing is a snapshot sorted by
//! `EntityId`, which is spawn order. Systems iterate those snapshots and
//! defer removals through `mark_for_removal` + `compact`, so nothing is
//! skipped or visited twice while a collection shrinks mid-tick.

use hecs::{Entity, World};

use arena_core::components::{Bullet, EntityId, Enemy, Powerup};
use arena_core::constants::ENEMY_START_HEALTH;
use arena_core::types::{Obstacle, Vector3};

/// Point-in-time view of one enemy.
#[derive(Debug, Clone)]
pub struct EnemyEntry {
    pub entity: Entity,
    pub id: EntityId,
    pub position: Vector3,
    pub enemy: Enemy,
}

/// Point-in-time view of one bullet.
#[derive(Debug, Clone)]
pub struct BulletEntry {
    pub entity: Entity,
    pub id: EntityId,
    pub position: Vector3,
    pub bullet: Bullet,
}

/// Point-in-time view of one powerup.
#[derive(Debug, Clone)]
pub struct PowerupEntry {
    pub entity: Entity,
    pub id: EntityId,
    pub position: Vector3,
    pub powerup: Powerup,
}

pub struct Registry {
    world: World,
    obstacles: Vec<Obstacle>,
    next_id: u32,
    despawn_buffer: Vec<Entity>,
}

impl Registry {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self {
            world: World::new(),
            obstacles,
            next_id: 0,
            despawn_buffer: Vec::new(),
        }
    }

    /// Static obstacles. Immutable for the registry's lifetime.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, position: Vector3) -> EntityId {
        let id = self.allocate_id();
        self.world.spawn((
            id,
            position,
            Enemy {
                health: ENEMY_START_HEALTH,
                last_attack_tick: None,
            },
        ));
        log::debug!("spawned enemy {} at {:?}", id.0, position);
        id
    }

    pub fn spawn_bullet(&mut self, position: Vector3, bullet: Bullet) -> EntityId {
        let id = self.allocate_id();
        self.world.spawn((id, position, bullet));
        id
    }

    pub fn spawn_powerup(&mut self, position: Vector3, powerup: Powerup) -> EntityId {
        let id = self.allocate_id();
        log::debug!(
            "spawned {:?} powerup {} at {:?}",
            powerup.kind,
            id.0,
            position
        );
        self.world.spawn((id, position, powerup));
        id
    }

    /// All live enemies in spawn order.
    pub fn enemies(&self) -> Vec<EnemyEntry> {
        let mut entries: Vec<EnemyEntry> = self
            .world
            .query::<(&EntityId, &Vector3, &Enemy)>()
            .iter()
            .map(|(entity, (id, pos, enemy))| EnemyEntry {
                entity,
                id: *id,
                position: *pos,
                enemy: enemy.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    /// All live bullets in spawn order.
    pub fn bullets(&self) -> Vec<BulletEntry> {
        let mut entries: Vec<BulletEntry> = self
            .world
            .query::<(&EntityId, &Vector3, &Bullet)>()
            .iter()
            .map(|(entity, (id, pos, bullet))| BulletEntry {
                entity,
                id: *id,
                position: *pos,
                bullet: bullet.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    /// All live powerups in spawn order.
    pub fn powerups(&self) -> Vec<PowerupEntry> {
        let mut entries: Vec<PowerupEntry> = self
            .world
            .query::<(&EntityId, &Vector3, &Powerup)>()
            .iter()
            .map(|(entity, (id, pos, powerup))| PowerupEntry {
                entity,
                id: *id,
                position: *pos,
                powerup: powerup.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    pub fn bullet_count(&self) -> usize {
        self.world.query::<&Bullet>().iter().count()
    }

    pub fn powerup_count(&self) -> usize {
        self.world.query::<&Powerup>().iter().count()
    }

    /// Look up the hecs entity carrying `id`.
    pub fn find(&self, id: EntityId) -> Option<Entity> {
        self.world
            .query::<&EntityId>()
            .iter()
            .find(|(_, entity_id)| **entity_id == id)
            .map(|(entity, _)| entity)
    }

    /// Remove an entity immediately. Returns false if `id` is not live.
    /// Not for use while iterating; systems use `mark_for_removal`.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.find(id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Queue an entity for removal at the next `compact`.
    pub fn mark_for_removal(&mut self, entity: Entity) {
        self.despawn_buffer.push(entity);
    }

    /// Despawn everything marked for removal. Returns the number removed.
    pub fn compact(&mut self) -> usize {
        let mut removed = 0;
        for entity in self.despawn_buffer.drain(..) {
            if self.world.despawn(entity).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    /// Overwrite an entity's position.
    pub fn set_position(&mut self, entity: Entity, position: Vector3) {
        if let Ok(mut pos) = self.world.get::<&mut Vector3>(entity) {
            *pos = position;
        }
    }

    /// Mutable access to an enemy component.
    pub fn enemy_mut(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, Enemy>> {
        self.world.get::<&mut Enemy>(entity).ok()
    }

    /// Remove every enemy, bullet, and powerup. Obstacles and the id counter survive.
    pub fn clear(&mut self) {
        self.despawn_buffer.clear();
        self.world.clear();
    }
}
