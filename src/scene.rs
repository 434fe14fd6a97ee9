// The room under the darkness: floor tiles, a wall ring, a short row of pillars,
// the fuel cans and the player square. Purely visual; nothing here collides.

use crate::config::WorldConfig;
use crate::draw::{fill_rect, stroke_rect};
use crate::pickups::{FuelPickups, PICKUP_SIZE};
use crate::movement::Player;
use crate::types::FrameBuffer;

const FLOOR: u32 = 0x00_0f_17_2a;
const WALL: u32 = 0x00_1f_29_37;
const WALL_EDGE: u32 = 0x00_11_18_27;
const FUEL: u32 = 0x00_f5_9e_0b;
const PLAYER: u32 = 0x00_ff_ff_ff;

/// Wall tiles as (col,row): the border ring plus every other tile of row 15,
/// columns 10..30.
pub fn wall_tiles(cfg: &WorldConfig) -> Vec<(usize, usize)> {
    let (cols, rows) = (cfg.cols, cfg.rows);
    let mut walls = Vec::with_capacity(2 * cols + 2 * rows);
    for x in 0..cols {
        walls.push((x, 0));
        walls.push((x, rows - 1));
    }
    for y in 1..rows - 1 {
        walls.push((0, y));
        walls.push((cols - 1, y));
    }
    if rows > 16 {
        walls.extend((10..30.min(cols - 1)).step_by(2).map(|x| (x, 15)));
    }
    walls
}

/// Redraw the whole room into `fb`.
pub fn draw_scene(
    fb: &mut FrameBuffer,
    cfg: &WorldConfig,
    walls: &[(usize, usize)],
    pickups: &FuelPickups,
    player: &Player,
) {
    let t = cfg.tile_size as i32;
    fb.fill(FLOOR);

    for &(c, r) in walls {
        let (x, y) = (c as i32 * t, r as i32 * t);
        fill_rect(fb, x, y, t, t, WALL);
        stroke_rect(fb, x, y, t, t, WALL_EDGE);
    }

    let (pw, ph) = (PICKUP_SIZE.x as i32, PICKUP_SIZE.y as i32);
    for p in pickups.iter() {
        let (x, y) = (p.position.x as i32 - pw / 2, p.position.y as i32 - ph / 2);
        fill_rect(fb, x, y, pw, ph, FUEL);
    }

    let s = Player::SIZE as i32;
    let (x, y) = (player.position.x as i32 - s / 2, player.position.y as i32 - s / 2);
    fill_rect(fb, x, y, s, s, PLAYER);
}
