//! # Chicken
//!
//! The playable character. A `Chicken` owns a `PhysicalObject` body and turns
//! held controls into forces once per logic tick. Its action is derived from
//! the body's contact flags after the last physics step.

use log::trace;

use crate::camera::CameraView;
use crate::errors::EngineError;
use crate::items::{self, Backpack, Item, ItemStack, Resource};
use crate::maths::{Aabc, Vec3};
use crate::physics::PhysicalObject;
use crate::render::Renderer;
use crate::traits::{Controllable, Hittable, Killable, Logicable, Renderable};

use super::{CharacterAction, Direction, FacingDirection};

/// Height of a chicken, in meters.
pub const CHICKEN_HEIGHT: f32 = 0.5;
/// Width and depth of a chicken, in meters.
pub const CHICKEN_WIDTH: f32 = 0.5 * 13.0 / 12.0;
/// Mass of a chicken, in kilograms.
pub const CHICKEN_MASS: f32 = 2.0;
/// Max health of a chicken.
pub const CHICKEN_LIFESPAN: f32 = 10.0;

/// Force applied every tick while walking, in newtons.
const WALK_FORCE: f32 = 120.0;
/// Force applied every tick while running, in newtons.
const RUN_FORCE: f32 = 240.0;
/// Upward force of a jump, in newtons.
const JUMP_FORCE: f32 = 600.0;

/// The main character of this game. we ain't callin it chicky chicky for nothing folks
#[derive(Debug)]
pub struct Chicken {
    body: PhysicalObject,
    backpack: Backpack,
    /// What the controls asked for.
    intent: CharacterAction,
    /// What the chicken is actually doing after the last logic tick.
    action: CharacterAction,
    moving: Option<Direction>,
    facing: FacingDirection,
    health: f32,
}

impl Chicken {
    /// Creates a chicken standing with its feet at `feet`.
    pub fn new(feet: Vec3) -> Result<Self, EngineError> {
        let half_size = Vec3::new(CHICKEN_WIDTH, CHICKEN_HEIGHT, CHICKEN_WIDTH) * 0.5;
        let center = feet + Vec3::new(0.0, half_size.y, 0.0);
        let mut body = PhysicalObject::new(CHICKEN_MASS, Aabc::new(center, half_size))?;
        body.set_on_ground_hit(|| trace!("chicken landed"));
        body.set_on_push(|| trace!("chicken bumped into a wall"));

        Ok(Chicken {
            body,
            backpack: Backpack::new(),
            intent: CharacterAction::Nothing,
            action: CharacterAction::Nothing,
            moving: None,
            facing: FacingDirection::default(),
            health: CHICKEN_LIFESPAN,
        })
    }

    /// The chicken's body.
    pub fn body(&self) -> &PhysicalObject {
        &self.body
    }

    /// Mutable access to the chicken's body, for the simulation.
    pub fn body_mut(&mut self) -> &mut PhysicalObject {
        &mut self.body
    }

    /// What the chicken is doing.
    pub fn action(&self) -> CharacterAction {
        self.action
    }

    /// Which way the chicken faces.
    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    /// The chicken's inventory.
    pub fn backpack(&self) -> &Backpack {
        &self.backpack
    }

    /// Puts items in the chicken's backpack.
    pub fn pick_up(&mut self, item: Item, count: u8) {
        items::stash(&mut self.backpack, item, count);
    }

    fn drops(&mut self) -> Vec<ItemStack> {
        let mut drops = std::mem::take(&mut self.backpack);
        items::stash(&mut drops, Item::Resource(Resource::Feather), 1);
        drops
    }
}

impl Controllable for Chicken {
    /// Walks the chicken
    fn walk(&mut self, direction: Direction, sprint: bool) {
        if !self.is_alive() {
            return;
        }
        self.intent = if sprint {
            CharacterAction::Run
        } else {
            CharacterAction::Walk
        };
        self.moving = Some(direction);

        match direction {
            Direction::Left => self.facing = FacingDirection::Left,
            Direction::Right => self.facing = FacingDirection::Right,
            _ => (),
        }
    }

    /// Jumps the chicken, if it has something to jump off.
    fn jump(&mut self, _sprint: bool) {
        if self.is_alive() && self.body.on_ground() {
            self.body.apply_force(Vec3::new(0.0, JUMP_FORCE, 0.0));
        }
    }

    /// Squats the chicken
    fn down(&mut self, _sprint: bool) {
        self.stop();
        self.intent = CharacterAction::Squat;
    }

    /// Stops the chicken's movement
    fn stop(&mut self) {
        self.moving = None;
        self.intent = CharacterAction::Nothing;
        self.body.stop_motion();
    }
}

impl Logicable for Chicken {
    fn logic(&mut self, _delta: f32) {
        if !self.is_alive() {
            self.action = CharacterAction::Dying;
            return;
        }

        if let Some(direction) = self.moving {
            let force = if self.intent == CharacterAction::Run {
                RUN_FORCE
            } else {
                WALK_FORCE
            };
            let push = match direction {
                Direction::Left => Vec3::new(-force, 0.0, 0.0),
                Direction::Right => Vec3::new(force, 0.0, 0.0),
                Direction::Forward => Vec3::new(0.0, 0.0, -force),
                Direction::Backward => Vec3::new(0.0, 0.0, force),
            };
            self.body.apply_force(push);
        }

        self.action = if !self.body.on_ground() {
            CharacterAction::Fall
        } else if self.moving.is_some() && self.body.pushing_wall() {
            CharacterAction::Push
        } else {
            self.intent
        };
    }
}

impl Hittable for Chicken {
    /// Hits the chicken. Tools make no difference to a chicken.
    fn hit(&mut self, _with: Option<&Item>, power: f32) -> Vec<ItemStack> {
        if !self.is_alive() {
            return Vec::new();
        }
        self.health = (self.health - power.max(0.0)).clamp(0.0, CHICKEN_LIFESPAN);
        if self.is_alive() {
            Vec::new()
        } else {
            self.moving = None;
            self.drops()
        }
    }
}

impl Killable for Chicken {
    /// Kills the chicken, dropping its inventory and a feather
    fn kill(&mut self) -> Vec<ItemStack> {
        if !self.is_alive() {
            return Vec::new();
        }
        self.health = 0.0;
        self.moving = None;
        self.drops()
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn health_left(&self) -> f32 {
        self.health
    }

    fn lifespan(&self) -> f32 {
        CHICKEN_LIFESPAN
    }
}

impl Renderable for Chicken {
    fn render(&self, _camera: &dyn CameraView, renderer: &mut dyn Renderer) {
        renderer.draw_body(self.body.hitbox());
    }
}
