use std::path::Path;

use color_eyre::{Result, eyre::eyre};
use image::{DynamicImage, Rgba, RgbaImage};
use ratatui::layout::Rect;
use ratatui_image::{Resize, picker::Picker, protocol::Protocol};

use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX, GHOST_DIAMETER, GHOST_SPRITE_COUNT};

/// Index into the sprite table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteId(pub usize);

/// Rendering surface for image sprites. Coordinates are world pixels.
pub trait SpriteCanvas {
    fn draw_centered(&mut self, sprite: SpriteId, x: f32, y: f32);
}

/// Blinky, Pinky, Inky, Clyde
pub const GHOST_COLORS: [Rgba<u8>; GHOST_SPRITE_COUNT] = [
    Rgba([255, 0, 0, 255]),
    Rgba([255, 184, 255, 255]),
    Rgba([0, 255, 255, 255]),
    Rgba([255, 184, 82, 255]),
];

const EYE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PUPIL: Rgba<u8> = Rgba([33, 33, 222, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Terminal cells covered by one ghost sprite
pub fn ghost_cell_size() -> (u16, u16) {
    let diameter = GHOST_DIAMETER as u16;
    (
        diameter.div_ceil(CELL_WIDTH_PX),
        diameter.div_ceil(CELL_HEIGHT_PX),
    )
}

/// Draws a classic ghost: a dome, a scalloped skirt and two eyes looking right
pub fn ghost_image(body: Rgba<u8>) -> RgbaImage {
    let size = GHOST_DIAMETER as u32;
    let r = size as f32 / 2.0;
    let eyes = [(r - 14.0, r - 6.0), (r + 14.0, r - 6.0)];
    let skirt_top = size as f32 - 10.0;

    RgbaImage::from_fn(size, size, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let dist = |cx: f32, cy: f32| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

        for (ex, ey) in eyes {
            if dist(ex + 3.0, ey) <= 4.5 {
                return PUPIL;
            }
            if dist(ex, ey) <= 9.0 {
                return EYE_WHITE;
            }
        }

        if py <= r {
            if dist(r, r) <= r { body } else { CLEAR }
        } else if py >= skirt_top && (x * 6 / size) % 2 == 1 {
            CLEAR
        } else {
            body
        }
    })
}

/// Loads `ghost{index}.png` from the assets directory, falling back to the
/// generated sprite
fn load_ghost_image(assets_dir: &Path, index: usize, color: Rgba<u8>) -> DynamicImage {
    let path = assets_dir.join(format!("ghost{index}.png"));
    if path.is_file() {
        match image::open(&path) {
            Ok(image) => {
                log::debug!("loaded ghost sprite {}", path.display());
                return image;
            }
            Err(err) => log::warn!("failed to load {}: {err}", path.display()),
        }
    }
    DynamicImage::ImageRgba8(ghost_image(color))
}

/// The ghost sprites, pre-encoded for the terminal
pub struct SpriteSheet {
    sprites: Vec<Protocol>,
    cell_width: u16,
    cell_height: u16,
}

impl SpriteSheet {
    pub fn load(assets_dir: &Path) -> Result<Self> {
        let picker = Picker::from_fontsize((CELL_WIDTH_PX, CELL_HEIGHT_PX));
        let (cell_width, cell_height) = ghost_cell_size();
        let area = Rect::new(0, 0, cell_width, cell_height);

        let mut sprites = Vec::with_capacity(GHOST_SPRITE_COUNT);
        for (index, color) in GHOST_COLORS.iter().enumerate() {
            let image = load_ghost_image(assets_dir, index, *color);
            let protocol = picker
                .new_protocol(image, area, Resize::Fit(None))
                .map_err(|err| eyre!("failed to encode ghost sprite {index}: {err:?}"))?;
            sprites.push(protocol);
        }

        log::info!(
            "sprite sheet ready: {} ghosts at {}x{} cells",
            sprites.len(),
            cell_width,
            cell_height
        );
        Ok(Self {
            sprites,
            cell_width,
            cell_height,
        })
    }

    pub fn get(&self, id: SpriteId) -> Option<&Protocol> {
        self.sprites.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_width, self.cell_height)
    }
}
