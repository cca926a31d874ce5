//! Arcade-style physics
//!
//! Constant gravity, axis-aligned boxes and a fixed timestep. The world knows
//! about exactly three kinds of thing: the player, the static ground slab and
//! the hazards. Screen coordinates: +x right, +y down.

use glam::Vec2;

use super::state::{Hazard, HazardVariant, Player};
use crate::consts::*;
use crate::tuning::{RectSpec, Tuning};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, center + size / 2.0)
    }

    pub fn from_rect(rect: &RectSpec) -> Self {
        let min = Vec2::new(rect.x, rect.y);
        Self::new(min, min + Vec2::new(rect.width, rect.height))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// A moving box. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub allow_gravity: bool,
}

impl Body {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    fn integrate(&mut self, gravity: f32, dt: f32) {
        if self.allow_gravity {
            self.vel.y += gravity * dt;
        }
        self.pos += self.vel * dt;
    }
}

/// Something that happened during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player overlaps a hazard
    PlayerHazard(u32),
    /// Hazard touched the ground and was removed
    HazardGround(u32),
    /// Hazard left through the left edge and was removed
    HazardOffscreen(u32),
}

/// The physics world for one scene
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    gravity: f32,
    bounds: Aabb,
    ground: Aabb,
    player: Player,
    hazards: Vec<Hazard>,
    accumulator: f32,
    paused: bool,
    next_id: u32,
}

impl ArcadeWorld {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let player = Player {
            body: Body {
                pos: tuning.player_start - size / 2.0,
                size,
                vel: Vec2::ZERO,
                allow_gravity: true,
            },
            touching_down: false,
        };

        Self {
            gravity: tuning.gravity,
            bounds: Aabb::new(
                Vec2::ZERO,
                Vec2::new(tuning.world_width, tuning.world_height),
            ),
            ground: Aabb::from_rect(&tuning.ground),
            player,
            hazards: Vec::new(),
            accumulator: 0.0,
            paused: false,
            next_id: 1,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn ground(&self) -> Aabb {
        self.ground
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn set_player_velocity_x(&mut self, vx: f32) {
        self.player.body.vel.x = vx;
    }

    pub fn set_player_velocity_y(&mut self, vy: f32) {
        self.player.body.vel.y = vy;
    }

    /// Freeze every body in place
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Add a gravity-free hazard whose bottom-left corner sits at `anchor`
    pub fn spawn_hazard(&mut self, variant: HazardVariant, anchor: Vec2, speed: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let size = variant.size();
        self.hazards.push(Hazard {
            id,
            variant,
            body: Body {
                pos: Vec2::new(anchor.x, anchor.y - size.y),
                size,
                vel: Vec2::new(-speed, 0.0),
                allow_gravity: false,
            },
        });
        id
    }

    /// Advance by a frame of `dt` seconds using fixed substeps
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();
        if self.paused {
            return contacts;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.substep(SIM_DT, &mut contacts);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        contacts
    }

    fn substep(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        self.step_player(dt);

        for hazard in &mut self.hazards {
            hazard.body.integrate(self.gravity, dt);
        }

        let ground = self.ground;
        let left_edge = self.bounds.min.x;
        self.hazards.retain(|hazard| {
            let aabb = hazard.body.aabb();
            if aabb.overlaps(&ground) {
                contacts.push(Contact::HazardGround(hazard.id));
                false
            } else if aabb.max.x < left_edge {
                contacts.push(Contact::HazardOffscreen(hazard.id));
                false
            } else {
                true
            }
        });

        let player = self.player.body.aabb();
        contacts.extend(
            self.hazards
                .iter()
                .filter(|h| h.body.aabb().overlaps(&player))
                .map(|h| Contact::PlayerHazard(h.id)),
        );
    }

    fn step_player(&mut self, dt: f32) {
        let body = &mut self.player.body;
        body.integrate(self.gravity, dt);
        let mut touching_down = false;

        // Ground
        let aabb = body.aabb();
        if aabb.overlaps(&self.ground) {
            let prev_bottom = aabb.max.y - body.vel.y * dt;
            if prev_bottom <= self.ground.min.y + 0.01 {
                // Landed on top
                body.pos.y = self.ground.min.y - body.size.y;
                body.vel.y = body.vel.y.min(0.0);
                touching_down = true;
            } else {
                // Side or underside: push out along the shallowest axis
                let push_left = aabb.max.x - self.ground.min.x;
                let push_right = self.ground.max.x - aabb.min.x;
                let push_down = self.ground.max.y - aabb.min.y;
                let shallowest = push_left.min(push_right).min(push_down);
                if shallowest == push_down {
                    body.pos.y += push_down;
                    body.vel.y = body.vel.y.max(0.0);
                } else if shallowest == push_left {
                    body.pos.x -= push_left;
                    body.vel.x = 0.0;
                } else {
                    body.pos.x += push_right;
                    body.vel.x = 0.0;
                }
            }
        }

        // World bounds
        let bounds = self.bounds;
        if body.pos.x < bounds.min.x {
            body.pos.x = bounds.min.x;
            body.vel.x = 0.0;
        } else if body.pos.x + body.size.x > bounds.max.x {
            body.pos.x = bounds.max.x - body.size.x;
            body.vel.x = 0.0;
        }
        if body.pos.y < bounds.min.y {
            body.pos.y = bounds.min.y;
            body.vel.y = body.vel.y.max(0.0);
        } else if body.pos.y + body.size.y >= bounds.max.y {
            body.pos.y = bounds.max.y - body.size.y;
            body.vel.y = body.vel.y.min(0.0);
            touching_down = true;
        }

        self.player.touching_down = touching_down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> ArcadeWorld {
        ArcadeWorld::new(&Tuning::default())
    }

    fn settle(world: &mut ArcadeWorld) {
        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_aabb_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(20.0, 20.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_player_falls_and_rests_on_ground() {
        let mut world = world();
        assert!(!world.player().touching_down);

        settle(&mut world);

        let player = world.player();
        assert!(player.touching_down);
        assert!((player.body.aabb().max.y - world.ground().min.y).abs() < 0.001);
        assert!(player.body.vel.y.abs() < 0.001);
    }

    #[test]
    fn test_jump_leaves_ground_and_returns() {
        let mut world = world();
        settle(&mut world);

        world.set_player_velocity_y(-900.0);
        world.step(1.0 / 60.0);
        assert!(!world.player().touching_down);
        assert!(world.player().body.aabb().max.y < world.ground().min.y);

        // Apex at v²/2g ≈ 0.45 s, back down well within a second
        settle(&mut world);
        assert!(world.player().touching_down);
    }

    #[test]
    fn test_player_clamped_to_world_bounds() {
        let mut world = world();
        world.set_player_velocity_x(-500.0);
        settle(&mut world);
        assert_eq!(world.player().body.pos.x, 0.0);

        world.set_player_velocity_x(500.0);
        for _ in 0..300 {
            world.step(1.0 / 60.0);
        }
        let aabb = world.player().body.aabb();
        assert!((aabb.max.x - 1200.0).abs() < 0.001);
    }

    #[test]
    fn test_hazard_spawns_with_bottom_left_at_anchor() {
        let mut world = world();
        let id = world.spawn_hazard(HazardVariant::Stump, Vec2::new(1200.0, 520.0), 300.0);
        let hazard = &world.hazards()[0];
        assert_eq!(hazard.id, id);
        assert_eq!(hazard.body.pos, Vec2::new(1200.0, 450.0));
        assert_eq!(hazard.body.vel, Vec2::new(-300.0, 0.0));
        assert!(!hazard.body.allow_gravity);
    }

    #[test]
    fn test_hazard_reaches_left_edge_at_distance_over_speed() {
        let mut world = world();
        world.spawn_hazard(HazardVariant::Pebble, Vec2::new(1200.0, 200.0), 300.0);

        // 1200 px at 300 px/s: 4 s, i.e. 240 frames at 60 Hz
        let mut frames = 0;
        while world.hazards()[0].body.pos.x > 0.001 {
            world.step(1.0 / 60.0);
            frames += 1;
            assert!(frames < 1000, "hazard never arrived");
        }
        assert!((239..=241).contains(&frames), "arrived after {} frames", frames);
        // No gravity: still at its spawn height
        assert_eq!(world.hazards()[0].body.aabb().max.y, 200.0);
    }

    #[test]
    fn test_clamped_frame_integrates_fully() {
        let mut world = world();
        world.spawn_hazard(HazardVariant::Pebble, Vec2::new(1200.0, 200.0), 300.0);

        // A 100 ms frame needs every one of its 12 substeps
        world.step(MAX_FRAME_DT);
        let x = world.hazards()[0].body.pos.x;
        assert!((x - 1170.0).abs() < 3.0, "hazard at x={}", x);

        // Longer frames count as 100 ms
        world.step(5.0);
        let x = world.hazards()[0].body.pos.x;
        assert!((x - 1140.0).abs() < 3.0, "hazard at x={}", x);
    }

    #[test]
    fn test_hazard_removed_once_fully_offscreen() {
        let mut world = world();
        let id = world.spawn_hazard(HazardVariant::Pebble, Vec2::new(10.0, 200.0), 300.0);

        let mut seen = Vec::new();
        for _ in 0..60 {
            seen.extend(world.step(1.0 / 60.0));
        }
        assert!(world.hazards().is_empty());
        assert!(seen.contains(&Contact::HazardOffscreen(id)));
    }

    #[test]
    fn test_hazard_touching_ground_is_destroyed() {
        let mut world = world();
        // Bottom edge already below the top of the ground
        let id = world.spawn_hazard(HazardVariant::Log, Vec2::new(900.0, 560.0), 300.0);

        let contacts = world.step(1.0 / 60.0);
        assert!(contacts.contains(&Contact::HazardGround(id)));
        assert!(world.hazards().is_empty());
    }

    #[test]
    fn test_player_hazard_overlap_reported() {
        let mut world = world();
        settle(&mut world);
        let px = world.player().body.pos.x;
        let id = world.spawn_hazard(HazardVariant::Stump, Vec2::new(px + 50.0, 520.0), 300.0);

        let contacts = world.step(1.0 / 60.0);
        assert!(contacts.contains(&Contact::PlayerHazard(id)));
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut world = world();
        world.spawn_hazard(HazardVariant::Log, Vec2::new(800.0, 520.0), 300.0);
        world.pause();

        let player_before = world.player().body.pos;
        let hazard_before = world.hazards()[0].body.pos;
        for _ in 0..30 {
            assert!(world.step(1.0 / 60.0).is_empty());
        }
        assert_eq!(world.player().body.pos, player_before);
        assert_eq!(world.hazards()[0].body.pos, hazard_before);
    }
}
