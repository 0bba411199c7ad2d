//! BoardView: paints a [`Scene`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use tui_match_types::{Coord, TileKind};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::layout::{Frame, TileHandle, TilePitch};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const LABEL_FG: Rgb = Rgb::new(20, 20, 28);
const PANEL_MIN_W: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// How a tile is being animated this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteEffect {
    Rest,
    Selected,
    Moving,
    /// Removal progress in `0.0..=1.0`.
    Removing(f32),
    /// Entrance progress in `0.0..=1.0`.
    Appearing(f32),
}

/// A tile as drawn this frame. Position is in board-relative cells and may be
/// fractional mid-animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub coord: Coord,
    pub kind: TileKind,
    pub x: f32,
    pub y: f32,
    pub effect: SpriteEffect,
}

impl Sprite {
    pub fn at_rest(handle: &TileHandle) -> Self {
        Self {
            coord: handle.coord,
            kind: handle.kind,
            x: handle.x as f32,
            y: handle.y as f32,
            effect: if handle.selected {
                SpriteEffect::Selected
            } else {
                SpriteEffect::Rest
            },
        }
    }
}

/// Everything the view needs for one terminal frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub columns: usize,
    pub rows: usize,
    pub pitch: TilePitch,
    pub score: u32,
    pub sprites: Vec<Sprite>,
    pub cursor: Option<Coord>,
    pub pending: bool,
    pub status: String,
}

impl Scene {
    /// A still scene: every handle of `frame` at rest.
    pub fn still(frame: &Frame) -> Self {
        Self {
            columns: frame.columns(),
            rows: frame.rows(),
            pitch: frame.pitch(),
            score: frame.score(),
            sprites: frame.handles().map(Sprite::at_rest).collect(),
            cursor: None,
            pending: false,
            status: String::new(),
        }
    }
}

/// Tile color for a kind.
pub fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        1 => Rgb::new(0xFF, 0x6B, 0x6B),
        2 => Rgb::new(0x4E, 0xCD, 0xC4),
        3 => Rgb::new(0xFF, 0xD9, 0x3D),
        4 => Rgb::new(0xA2, 0x9B, 0xFE),
        5 => Rgb::new(0x00, 0xB8, 0x94),
        _ => Rgb::new(0xCC, 0xCC, 0xCC),
    }
}

fn tile_label(kind: TileKind) -> char {
    char::from_digit(kind as u32, 10).unwrap_or('*')
}

/// Lays out the board (centered, bordered) and the score panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    /// Top-left cell of the board interior (inside the border).
    pub fn board_origin(&self, scene: &Scene, viewport: Viewport) -> (u16, u16) {
        let (w, h) = scene.pitch.extent(scene.columns, scene.rows);
        let frame_w = w + 2;
        let frame_h = h + 2;
        let panel = if viewport.width >= frame_w + 2 + PANEL_MIN_W {
            2 + PANEL_MIN_W
        } else {
            0
        };
        let start_x = viewport.width.saturating_sub(frame_w + panel) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        (start_x + 1, start_y + 1)
    }

    /// Map a terminal cell to board-relative cells, if inside the board.
    pub fn to_board_cell(
        &self,
        scene: &Scene,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<(u16, u16)> {
        let (ox, oy) = self.board_origin(scene, viewport);
        let (w, h) = scene.pitch.extent(scene.columns, scene.rows);
        let x = column.checked_sub(ox)?;
        let y = row.checked_sub(oy)?;
        (x < w && y < h).then_some((x, y))
    }

    pub fn render(&self, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    pub fn render_into(&self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (ox, oy) = self.board_origin(scene, viewport);
        let (w, h) = scene.pitch.extent(scene.columns, scene.rows);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(ox, oy, w, h, ' ', bg);
        draw_border(
            fb,
            ox.saturating_sub(1),
            oy.saturating_sub(1),
            w + 2,
            h + 2,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        // Grid dots under every slot; tiles cover them.
        let dot = bg.dim();
        for y in 0..scene.rows {
            for x in 0..scene.columns {
                let (cx, cy) = scene.pitch.origin(Coord::new(x, y));
                fb.put_char(
                    ox + cx + scene.pitch.tile_w / 2,
                    oy + cy + (scene.pitch.tile_h.saturating_sub(1)) / 2,
                    '·',
                    dot,
                );
            }
        }

        // Moving tiles last so they pass over resting ones.
        for sprite in scene
            .sprites
            .iter()
            .filter(|s| s.effect != SpriteEffect::Moving)
            .chain(scene.sprites.iter().filter(|s| s.effect == SpriteEffect::Moving))
        {
            self.draw_sprite(fb, scene.pitch, ox, oy, sprite);
        }

        if let Some(at) = scene.cursor {
            self.draw_cursor(fb, scene.pitch, ox, oy, at);
        }

        self.draw_panel(fb, scene, viewport, ox + w + 1, oy.saturating_sub(1));
    }

    fn draw_sprite(&self, fb: &mut FrameBuffer, pitch: TilePitch, ox: u16, oy: u16, s: &Sprite) {
        let px = ox + s.x.max(0.0).round() as u16;
        let py = oy + s.y.max(0.0).round() as u16;
        let color = tile_color(s.kind);

        let (fill, ch) = match s.effect {
            SpriteEffect::Removing(t) if t >= 0.5 => (color.mix(BOARD_BG, t), '░'),
            SpriteEffect::Removing(t) => (color.mix(BOARD_BG, t), ' '),
            SpriteEffect::Appearing(t) => (BOARD_BG.mix(color, t), ' '),
            _ => (color, ' '),
        };
        let mut style = CellStyle::new(LABEL_FG, fill);
        if matches!(s.effect, SpriteEffect::Moving | SpriteEffect::Selected) {
            style = style.bold();
        }
        fb.fill_rect(px, py, pitch.tile_w, pitch.tile_h, ch, style);

        let mid_y = py + pitch.tile_h.saturating_sub(1) / 2;
        if !matches!(s.effect, SpriteEffect::Removing(t) if t >= 0.5) {
            fb.put_char(px + pitch.tile_w / 2, mid_y, tile_label(s.kind), style);
        }
        if s.effect == SpriteEffect::Selected && pitch.tile_w >= 3 {
            let mark = CellStyle::new(Rgb::new(255, 255, 255), fill).bold();
            fb.put_char(px, mid_y, '[', mark);
            fb.put_char(px + pitch.tile_w - 1, mid_y, ']', mark);
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, pitch: TilePitch, ox: u16, oy: u16, at: Coord) {
        let (cx, cy) = pitch.origin(at);
        let x0 = ox + cx;
        let y0 = oy + cy;
        let x1 = x0 + pitch.tile_w.saturating_sub(1);
        let y1 = y0 + pitch.tile_h.saturating_sub(1);
        let bg = fb.get(x0, y0).map(|c| c.style.bg).unwrap_or(BOARD_BG);
        let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
        fb.put_char(x0, y0, '┌', style);
        let bg = fb.get(x1, y1).map(|c| c.style.bg).unwrap_or(BOARD_BG);
        fb.put_char(x1, y1, '┘', CellStyle { bg, ..style });
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, scene: &Scene, viewport: Viewport, x: u16, y: u16) {
        let panel_x = x.saturating_add(2);
        if panel_x.saturating_add(PANEL_MIN_W) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut row = y;
        fb.put_str(panel_x, row, "SCORE", label);
        row += 1;
        fb.put_u32(panel_x, row, scene.score, value);
        row += 2;

        fb.put_str(panel_x, row, "STATE", label);
        row += 1;
        fb.put_str(
            panel_x,
            row,
            if scene.pending { "resolving" } else { "ready" },
            value,
        );
        row += 2;

        if !scene.status.is_empty() {
            fb.put_str(panel_x, row, &scene.status, value);
            row += 2;
        }

        for line in ["click/enter: pick", "n: new game", "q: quit"] {
            if row >= viewport.height {
                break;
            }
            fb.put_str(panel_x, row, line, hint);
            row += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Renderer;
    use tui_match_types::Board;

    fn scene() -> Scene {
        let board = Board::from_rows(vec![vec![1, 2], vec![0, 3]]).unwrap();
        Scene::still(&Renderer::default().render(&board, 12, Some(Coord::new(1, 0)), false))
    }

    #[test]
    fn border_wraps_board_extent() {
        let s = scene();
        // 2x2 board, default pitch: 9 wide, 4 tall, plus border.
        let vp = Viewport::new(11, 6);
        let fb = BoardView::new().render(&s, vp);
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(10, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(0, 5).unwrap().ch, '└');
        assert_eq!(fb.get(10, 5).unwrap().ch, '┘');
    }

    #[test]
    fn tiles_show_kind_and_selection_marks() {
        let s = scene();
        let fb = BoardView::new().render(&s, Viewport::new(11, 6));
        // Tile (0,0) interior starts at (1,1); label at x + tile_w/2.
        assert_eq!(fb.get(3, 1).unwrap().ch, '1');
        assert_eq!(fb.get(3, 1).unwrap().style.bg, tile_color(1));
        // Selected tile (1,0) starts at column 1 + 5.
        assert_eq!(fb.get(6, 1).unwrap().ch, '[');
        assert_eq!(fb.get(9, 1).unwrap().ch, ']');
        // Empty slot (0,1) shows a grid dot.
        assert_eq!(fb.get(3, 3).unwrap().ch, '·');
    }

    #[test]
    fn panel_shows_score_when_wide_enough() {
        let s = scene();
        let fb = BoardView::new().render(&s, Viewport::new(40, 12));
        let all: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
        assert!(all.contains("SCORE"));
        assert!(all.contains("12"));
    }

    #[test]
    fn screen_cells_map_back_to_board_cells() {
        let s = scene();
        let view = BoardView::new();
        let vp = Viewport::new(11, 6);
        assert_eq!(view.to_board_cell(&s, vp, 1, 1), Some((0, 0)));
        assert_eq!(view.to_board_cell(&s, vp, 0, 0), None);
        assert_eq!(view.to_board_cell(&s, vp, 9, 4), Some((8, 3)));
        assert_eq!(view.to_board_cell(&s, vp, 10, 4), None);
    }
}
