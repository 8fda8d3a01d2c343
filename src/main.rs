use anyhow::Context;
use macroquad::prelude::*;
use rogue_depths::{
    camera_bounds, grid_to_world, Direction, MonsterManager, Player, SpriteRegion, SpriteSheet,
    StepOutcome, World, PIXELS_PER_UNIT,
};

const SCREEN_WIDTH: i32 = 1920;
const SCREEN_HEIGHT: i32 = 1080;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 8.0;

struct GameConfig {
    level_path: String,
    tiles_path: String,
    monsters_path: String,
    rogues_path: String,
    player_start: IVec2,
    player_sprite: IVec2,
    player_strength: f32,
    zoom: f32,
}

impl GameConfig {
    /// The first argument, if present, overrides the level file.
    fn from_args() -> Self {
        let level_path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| "assets/World.ldtk".to_owned());
        Self {
            level_path,
            tiles_path: "assets/tiles.png".to_owned(),
            monsters_path: "assets/monsters.png".to_owned(),
            rogues_path: "assets/rogues.png".to_owned(),
            player_start: ivec2(6, 7),
            player_sprite: ivec2(0, 1),
            player_strength: 1.0,
            zoom: 3.0,
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Rogue Depths".into(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        ..Default::default()
    }
}

fn read_direction() -> Option<Direction> {
    if is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Up) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Down) {
        Some(Direction::Down)
    } else if is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right) {
        Some(Direction::Right)
    } else {
        None
    }
}

async fn run(config: GameConfig) -> anyhow::Result<()> {
    let mut monsters = MonsterManager::new();
    let mut world = World::load(&config.level_path, &mut monsters)
        .with_context(|| format!("Building world from {}", config.level_path))?;

    let tiles = SpriteSheet::load(&config.tiles_path).await?;
    let monster_sheet = SpriteSheet::load(&config.monsters_path).await?;
    let rogues = SpriteSheet::load(&config.rogues_path).await?;

    let mut player = Player::new(
        config.player_start,
        config.player_strength,
        SpriteRegion::from_cell(config.player_sprite),
    );
    let mut zoom = config.zoom;

    loop {
        if let Some(dir) = read_direction() {
            match player.try_step(dir, &world, &mut monsters) {
                StepOutcome::Attacked { killed: true } => log::info!("monster slain"),
                StepOutcome::Moved | StepOutcome::Blocked | StepOutcome::Attacked { .. } => {}
            }
        }
        if is_key_pressed(KeyCode::E) && player.interact(&mut world, &mut monsters) {
            log::info!("now on depth {}", player.depth);
        }
        if is_key_pressed(KeyCode::PageUp) && zoom < MAX_ZOOM {
            zoom *= 2.0;
        } else if is_key_pressed(KeyCode::PageDown) && zoom > MIN_ZOOM {
            zoom /= 2.0;
        }

        let half_cell = PIXELS_PER_UNIT as f32 / 2.0;
        let target = grid_to_world(player.position) + vec2(half_cell, half_cell);
        let view = camera_bounds(target, zoom, vec2(screen_width(), screen_height()));

        clear_background(BLACK);
        set_camera(&Camera2D::from_display_rect(view));

        world.draw(&tiles, view);
        monsters.draw(&monster_sheet, view);
        player.draw(&rogues);

        set_default_camera();
        draw_text(&format!("Depth {}", player.depth), 20.0, 40.0, 32.0, WHITE);

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(GameConfig::from_args()).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
