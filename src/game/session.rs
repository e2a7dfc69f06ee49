// The per-frame controller: input -> moves -> physics step -> camera

use anyhow::{Context, Result};
use glam::Vec2;
use std::path::Path;

use super::player::{Moves, Player};
use super::tuning::Tuning;
use crate::config::PidginConfig;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::{presets, PhysicsWorld};
use crate::engine::renderer::{
    Camera, DrawList, LineVertex, QuadBatch, QuadInstance, Renderer, TextureHandle,
};
use crate::map::{
    build_collision_segments, parse_collision_rules, CollisionRules, LineSegment, TileMap,
};

/// Back-off step sizes in meters (A / W keys)
const BACK_OFF_X: f32 = 1.0;
const BACK_OFF_Y: f32 = -0.4;

const EDGE_COLOR: [f32; 4] = [0.2, 1.0, 0.2, 1.0];
const PLAYER_BOX_COLOR: [f32; 4] = [1.0, 0.2, 1.0, 1.0];

/// Texture handles the scene draws with
pub struct SpriteSet {
    pub pidgin: TextureHandle,
    pub pidgin_crouch: TextureHandle,
    pub tiles: TextureHandle,
    /// Number of tile columns in the atlas strip
    pub tile_columns: u32,
}

impl SpriteSet {
    /// Load the demo's textures. The tile atlas is a horizontal strip; tile
    /// id N uses column N-1.
    pub fn load(renderer: &mut Renderer, assets_dir: &Path, tile_width: u32) -> Result<Self> {
        let textures = assets_dir.join("textures");
        let pidgin = renderer.load_texture(textures.join("pidgin.png"))?;
        let pidgin_crouch = renderer.load_texture(textures.join("pidgin-crouch.png"))?;
        let tiles = renderer.load_texture(textures.join("tiles.png"))?;
        let (atlas_width, _) = renderer.texture_size(tiles);
        Ok(Self {
            pidgin,
            pidgin_crouch,
            tiles,
            tile_columns: (atlas_width / tile_width).max(1),
        })
    }
}

/// Owns the world state and runs the fixed-tick update.
pub struct GameSession {
    physics: PhysicsWorld,
    map: TileMap,
    segments: Vec<LineSegment>,
    player: Player,
    tuning: Tuning,
}

impl GameSession {
    /// Load the configured map and its collision description, then build
    /// the world. A missing or malformed file is fatal.
    pub fn new(config: &PidginConfig, assets_dir: &Path) -> Result<Self> {
        let maps = assets_dir.join("maps");
        let map_path = maps.join(format!("{}.map", config.map));
        let collision_path = maps.join(format!("{}.collision", config.map));

        let map = TileMap::load(&map_path)
            .with_context(|| format!("loading map {}", map_path.display()))?;
        let rules_text = std::fs::read_to_string(&collision_path)
            .with_context(|| format!("reading collisions {}", collision_path.display()))?;
        let rules = parse_collision_rules(&rules_text)
            .with_context(|| format!("parsing collisions {}", collision_path.display()))?;

        Ok(Self::from_parts(config, map, &rules))
    }

    /// Build a session from an already-loaded map and rules.
    pub fn from_parts(config: &PidginConfig, map: TileMap, rules: &CollisionRules) -> Self {
        let tuning = Tuning::from_config(config);
        let mut physics = PhysicsWorld::new(tuning.gravity_y);

        let segments = build_collision_segments(&map, rules);
        let ground = physics.add_rigid_body(presets::ground_body());
        for segment in &segments {
            physics.add_collider(presets::edge_collider(segment), ground);
        }

        let player = Player::spawn(&mut physics, &map, &tuning);

        Self {
            physics,
            map,
            segments,
            player,
            tuning,
        }
    }

    /// Run one fixed tick: read input, apply moves, step the world,
    /// recompute the camera.
    pub fn update(&mut self, input: &InputState, camera: &mut Camera) {
        let moves = Moves {
            left: input.is_pressed(Action::MoveLeft),
            right: input.is_pressed(Action::MoveRight),
            jump: input.is_pressed(Action::Jump),
            crouch: input.is_pressed(Action::Crouch),
        };

        if input.just_pressed(Action::Reset) {
            self.player.reset(&mut self.physics);
        }
        if input.just_pressed(Action::ToggleAutoRun) {
            self.tuning.toggle_auto_run();
            self.player.halt(&mut self.physics);
        }
        if input.is_pressed(Action::BackOffX) {
            self.player
                .back_off(&mut self.physics, &self.map, BACK_OFF_X, 0.0);
        }
        if input.is_pressed(Action::BackOffY) {
            self.player
                .back_off(&mut self.physics, &self.map, 0.0, BACK_OFF_Y);
        }

        self.tuning.apply_adjustments(input);
        if self.physics.gravity_y() != self.tuning.gravity_y {
            self.physics.set_gravity(self.tuning.gravity_y);
        }

        self.player.apply_moves(&mut self.physics, &self.tuning, moves);
        self.physics.step();

        self.control_camera(camera);
    }

    /// Center the camera on the player, clamped to the map, zooming out
    /// with horizontal speed.
    fn control_camera(&self, camera: &mut Camera) {
        let vx = self.player.velocity(&self.physics).x;
        if vx > 1.0 {
            camera.set_zoom(vx.recip());
        }
        camera.follow_clamped(
            self.player.position_px(&self.physics),
            self.map.pixel_width(),
            self.map.pixel_height(),
        );
    }

    /// Flatten the world into quad batches and debug lines.
    pub fn build_draw_list(&self, sprites: &SpriteSet) -> DrawList {
        let mut draw = DrawList::default();

        // Tile layer
        let tw = self.map.tile_width() as f32;
        let th = self.map.tile_height() as f32;
        let columns = sprites.tile_columns as f32;
        let tile_instances: Vec<QuadInstance> = self
            .map
            .occupied_cells()
            .map(|(x, y, id)| {
                let column = (id - 1) % sprites.tile_columns;
                let u0 = column as f32 / columns;
                let u1 = (column + 1) as f32 / columns;
                QuadInstance {
                    center: [x as f32 * tw + tw / 2.0, y as f32 * th + th / 2.0],
                    size: [tw, th],
                    uv_min: [u0, 0.0],
                    uv_max: [u1, 1.0],
                    color: [1.0, 1.0, 1.0, 1.0],
                }
            })
            .collect();
        draw.batches.push(QuadBatch {
            texture: sprites.tiles,
            instances: tile_instances,
        });

        // Player sprite, flipped by swapping u when facing left
        let position = self.player.position_px(&self.physics);
        let half = self.player.half_extents_px(&self.physics);
        let (u0, u1) = if self.player.facing_right {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        };
        draw.batches.push(QuadBatch {
            texture: if self.player.crouching {
                sprites.pidgin_crouch
            } else {
                sprites.pidgin
            },
            instances: vec![QuadInstance {
                center: position.to_array(),
                size: (half * 2.0).to_array(),
                uv_min: [u0, 0.0],
                uv_max: [u1, 1.0],
                color: [1.0, 1.0, 1.0, 1.0],
            }],
        });

        // Collision overlay: merged edges plus the player box
        for segment in &self.segments {
            draw.lines.push(LineVertex {
                position: segment.start.to_array(),
                color: EDGE_COLOR,
            });
            draw.lines.push(LineVertex {
                position: segment.end.to_array(),
                color: EDGE_COLOR,
            });
        }
        let corners = [
            position + Vec2::new(-half.x, -half.y),
            position + Vec2::new(half.x, -half.y),
            position + Vec2::new(half.x, half.y),
            position + Vec2::new(-half.x, half.y),
        ];
        for i in 0..4 {
            draw.lines.push(LineVertex {
                position: corners[i].to_array(),
                color: PLAYER_BOX_COLOR,
            });
            draw.lines.push(LineVertex {
                position: corners[(i + 1) % 4].to_array(),
                color: PLAYER_BOX_COLOR,
            });
        }

        draw
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }
}
