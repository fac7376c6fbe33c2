#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and wrapping when casting grid indices (at most GRID_MAX) to terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // Allow sign loss when flooring canvas coordinates that were already range-checked
    clippy::cast_sign_loss,
    // Allow precision loss when converting grid indices to canvas pixels
    clippy::cast_precision_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::animation::lerp;
use crate::app::{App, MenuItem};
use crate::components::{GamePhase, Theme};
use crate::game::SHAKE_STRENGTH;
use crate::layout::BoardLayout;
use crate::persistence::highscores::HighScoreTable;
use crate::session::Session;
use crate::shapes::Shape;
use crate::tray::Tray;

const CELL_W: u16 = 2;
const SLOT_INNER_W: u16 = 12;
const SLOT_INNER_H: u16 = 5;
const SLOT_W: u16 = SLOT_INNER_W + 2;
const SLOT_H: u16 = SLOT_INNER_H + 2;
const SLOT_GAP: u16 = 1;
const TITLE_H: u16 = 2;
const TRAY_GAP: u16 = 1;
const INFO_W: u16 = 26;

const EMPTY_CELL: Color = Color::Rgb(60, 60, 72);
const NEUTRAL_FILL: Color = Color::Rgb(150, 150, 160);
const INVALID_GHOST: Color = Color::Rgb(200, 60, 60);
const FLASH: Color = Color::Rgb(255, 255, 255);

/// Where the board sits on the terminal, and the maps between terminal
/// cells and the virtual canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardView {
    pub layout: BoardLayout,
    /// Title, grid and tray column, without the info panel.
    pub board: Rect,
    pub info: Rect,
    /// Terminal cell of grid cell `(0, 0)`.
    pub grid_col: u16,
    pub grid_row: u16,
    /// Top-left corner of the first tray box.
    pub tray_col: u16,
    pub tray_row: u16,
}

fn tray_width(count: usize) -> u16 {
    let n = count.max(1) as u16;
    n * SLOT_W + (n - 1) * SLOT_GAP
}

/// Terminal columns and rows needed by the board column.
fn board_size(layout: &BoardLayout) -> (u16, u16) {
    let grid_outer_w = layout.grid_w as u16 * CELL_W + 2;
    let w = grid_outer_w.max(tray_width(layout.tray_count));
    let h = TITLE_H + layout.grid_h as u16 + 2 + TRAY_GAP + SLOT_H;
    (w, h)
}

/// Smallest terminal that fits `layout` with the info panel.
#[must_use]
pub fn min_terminal_size(layout: &BoardLayout) -> (u16, u16) {
    let (w, h) = board_size(layout);
    (w + INFO_W, h)
}

impl BoardView {
    /// Centres the board in `area`. `None` if the terminal is too small.
    #[must_use]
    pub fn new(area: Rect, layout: BoardLayout) -> Option<Self> {
        let (board_w, board_h) = board_size(&layout);
        let (min_w, min_h) = min_terminal_size(&layout);
        if area.width < min_w || area.height < min_h {
            return None;
        }

        let x0 = area.x + (area.width - min_w) / 2;
        let y0 = area.y + (area.height - min_h) / 2;
        let grid_outer_w = layout.grid_w as u16 * CELL_W + 2;

        Some(Self {
            layout,
            board: Rect::new(x0, y0, board_w, board_h),
            info: Rect::new(x0 + board_w + 1, y0, INFO_W - 1, board_h),
            grid_col: x0 + (board_w - grid_outer_w) / 2 + 1,
            grid_row: y0 + TITLE_H + 1,
            tray_col: x0 + (board_w - tray_width(layout.tray_count)) / 2,
            tray_row: y0 + TITLE_H + layout.grid_h as u16 + 2 + TRAY_GAP,
        })
    }

    /// The grid including its border.
    #[must_use]
    pub fn grid_outer(&self) -> Rect {
        Rect::new(
            self.grid_col - 1,
            self.grid_row - 1,
            self.layout.grid_w as u16 * CELL_W + 2,
            self.layout.grid_h as u16 + 2,
        )
    }

    /// Tray box `index` including its border.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.tray_col + index as u16 * (SLOT_W + SLOT_GAP),
            self.tray_row,
            SLOT_W,
            SLOT_H,
        )
    }

    #[must_use]
    pub fn slot_at(&self, col: u16, row: u16) -> Option<usize> {
        (0..self.layout.tray_count).find(|&i| rect_contains(self.slot_rect(i), col, row))
    }

    /// Terminal cell of `shape`'s top-left corner, centred in tray box `index`.
    #[must_use]
    pub fn shape_origin(&self, index: usize, shape: &Shape) -> (u16, u16) {
        let rect = self.slot_rect(index);
        let w = shape.width as u16 * CELL_W;
        let h = shape.height as u16;
        (
            rect.x + 1 + SLOT_INNER_W.saturating_sub(w) / 2,
            rect.y + 1 + SLOT_INNER_H.saturating_sub(h) / 2,
        )
    }

    /// Canvas point under terminal cell `(col, row)`.
    ///
    /// Inside a tray box the point lands on the same shape cell the terminal
    /// shows there, so a press grabs the cell the player clicked.
    #[must_use]
    pub fn to_canvas(&self, col: u16, row: u16, tray: &Tray) -> (f32, f32) {
        if let Some(index) = self.slot_at(col, row) {
            let rect = self.layout.tray_slot_rect(index);
            return match tray.get(index).filter(|p| !p.used) {
                Some(piece) => {
                    let shape = piece.shape();
                    let (c0, r0) = self.shape_origin(index, shape);
                    let fx = (f32::from(col) - f32::from(c0)) / f32::from(CELL_W) + 0.25;
                    let fy = f32::from(row) - f32::from(r0) + 0.5;
                    let pc = self.layout.preview_cell();
                    let (ox, oy) = self.layout.tray_preview_origin(index, shape);
                    (
                        (ox + fx * pc).clamp(rect.x, rect.x + rect.w * 0.999),
                        (oy + fy * pc).clamp(rect.y, rect.y + rect.h * 0.999),
                    )
                }
                None => rect.center(),
            };
        }

        let l = &self.layout;
        (
            l.grid_x + (f32::from(col) - f32::from(self.grid_col) + 0.5) / f32::from(CELL_W) * l.cell,
            l.grid_y + (f32::from(row) - f32::from(self.grid_row) + 0.5) * l.cell,
        )
    }

    /// Terminal cell containing canvas point `(x, y)`, on the grid's map.
    #[must_use]
    pub fn to_terminal(&self, x: f32, y: f32) -> (i32, i32) {
        let l = &self.layout;
        (
            i32::from(self.grid_col) + ((x - l.grid_x) / l.cell * f32::from(CELL_W)).floor() as i32,
            i32::from(self.grid_row) + ((y - l.grid_y) / l.cell).floor() as i32,
        )
    }

    /// Like [`Self::to_terminal`], rounding to the nearest cell corner.
    fn to_terminal_corner(&self, x: f32, y: f32) -> (i32, i32) {
        let l = &self.layout;
        (
            i32::from(self.grid_col) + ((x - l.grid_x) / l.cell * f32::from(CELL_W)).round() as i32,
            i32::from(self.grid_row) + ((y - l.grid_y) / l.cell).round() as i32,
        )
    }
}

fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.left() && col < rect.right() && row >= rect.top() && row < rect.bottom()
}

// Writes one terminal cell, ignoring anything outside `clip`
fn paint(buf: &mut Buffer, clip: Rect, col: i32, row: i32, symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(col), u16::try_from(row)) else {
        return;
    };
    if !rect_contains(clip, x, y) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

// A grid cell is two terminal cells wide
fn paint_block(buf: &mut Buffer, clip: Rect, col: i32, row: i32, symbols: [&str; 2], style: Style) {
    paint(buf, clip, col, row, symbols[0], style);
    paint(buf, clip, col + 1, row, symbols[1], style);
}

fn paint_text(buf: &mut Buffer, clip: Rect, col: i32, row: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        let mut tmp = [0u8; 4];
        paint(buf, clip, col + i as i32, row, ch.encode_utf8(&mut tmp), style);
    }
}

fn theme_fill(theme: Option<Theme>) -> Color {
    theme.map_or(NEUTRAL_FILL, Theme::fill)
}

fn shift_rect(rect: Rect, (dx, dy): (i32, i32), bounds: Rect) -> Rect {
    let x = (i32::from(rect.x) + dx).max(0) as u16;
    let y = (i32::from(rect.y) + dy).max(0) as u16;
    Rect::new(x, y, rect.width, rect.height).intersection(bounds)
}

/// Shake offset in terminal cells.
fn shake_cells(offset: (f32, f32)) -> (i32, i32) {
    (
        (offset.0 / SHAKE_STRENGTH * 1.5).round() as i32,
        (offset.1 / SHAKE_STRENGTH * 0.75).round() as i32,
    )
}

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if app.session.phase() == GamePhase::Menu {
        app.view = None;
        render_menu(f, app, area);
        return;
    }

    let Some(view) = BoardView::new(area, *app.session.layout()) else {
        app.view = None;
        let (min_w, min_h) = min_terminal_size(app.session.layout());
        let warning_text = Paragraph::new(format!(
            "Terminal too small!\nNeed {min_w}x{min_h}, have {}x{}.\nPlease resize your terminal.",
            area.width, area.height
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Block Blaster - Paused"),
        );
        f.render_widget(warning_text, centered_rect(60, 40, area));
        return;
    };
    app.view = Some(view);

    let session = &app.session;
    let shake = shake_cells(session.shake().offset);

    let title = Paragraph::new("BLOCK BLASTER")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, Rect::new(view.board.x, view.board.y, view.board.width, TITLE_H));

    render_grid(f, session, &view, shake);
    render_tray(f, session, &view);
    render_floating_piece(f, session, &view);
    render_particles(f, session, &view);
    render_popups(f, session, &view);
    render_info(f, session, &view);

    if session.phase() == GamePhase::GameOver {
        render_game_over(f, session, view.board);
    }
}

fn render_grid(f: &mut Frame, session: &Session, view: &BoardView, shake: (i32, i32)) {
    let clip = f.area();
    let outer = shift_rect(view.grid_outer(), shake, clip);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
        outer,
    );

    let grid = session.grid();
    let interaction = session.interaction();
    let drag = interaction.drag();
    let flash = interaction.clearing();
    let drag_theme = drag
        .and_then(|d| session.tray().get(d.index))
        .map(|p| p.theme);
    let col0 = i32::from(view.grid_col) + shake.0;
    let row0 = i32::from(view.grid_row) + shake.1;

    let buf = f.buffer_mut();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let col = col0 + x as i32 * i32::from(CELL_W);
            let row = row0 + y as i32;
            let predicted =
                drag.is_some_and(|d| d.preview.row_predicted(y) || d.preview.col_predicted(x));

            let (symbols, style) = match flash {
                Some(flash) if flash.mask.contains(x, y) => {
                    let fg = if flash.intensity() > 0.5 {
                        FLASH
                    } else {
                        theme_fill(grid.theme_at(x, y))
                    };
                    (["█", "█"], Style::default().fg(fg))
                }
                _ if grid.is_occupied(x, y) => match (predicted, drag_theme) {
                    // Cells about to clear take the dragged piece's colour
                    (true, Some(theme)) => (["▓", "▓"], Style::default().fg(theme.fill())),
                    _ if session.pops().get(x, y) > 0.0 => {
                        (["█", "█"], Style::default().fg(FLASH))
                    }
                    _ => (["█", "█"], Style::default().fg(theme_fill(grid.theme_at(x, y)))),
                },
                _ if predicted => (
                    ["░", "░"],
                    Style::default().fg(drag_theme.map_or(NEUTRAL_FILL, Theme::fill)),
                ),
                _ => (["·", " "], Style::default().fg(EMPTY_CELL)),
            };
            paint_block(buf, clip, col, row, symbols, style);
        }
    }

    // Ghost of the dragged piece where it would land
    let Some(drag) = drag else {
        return;
    };
    let Some((ox, oy)) = drag.preview.origin else {
        return;
    };
    let Some(piece) = session.tray().get(drag.index) else {
        return;
    };
    let style = if drag.preview.valid {
        Style::default().fg(piece.theme.fill())
    } else {
        Style::default().fg(INVALID_GHOST)
    };
    let symbols = if drag.preview.valid {
        ["▒", "▒"]
    } else {
        ["░", "░"]
    };
    for (sx, sy) in piece.shape().filled_cells() {
        let gx = ox + sx as i32;
        let gy = oy + sy as i32;
        if !grid.in_bounds(gx, gy) {
            continue;
        }
        paint_block(
            buf,
            clip,
            col0 + gx * i32::from(CELL_W),
            row0 + gy,
            symbols,
            style,
        );
    }
}

fn render_tray(f: &mut Frame, session: &Session, view: &BoardView) {
    let interaction = session.interaction();
    let held = interaction
        .drag()
        .map(|d| d.index)
        .or_else(|| interaction.returning().map(|a| a.index));

    for (index, piece) in session.tray().pieces().iter().enumerate() {
        let rect = view.slot_rect(index);
        let border = if piece.used {
            Color::DarkGray
        } else {
            piece.theme.fill()
        };
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", index + 1)),
            rect,
        );

        if piece.used || held == Some(index) {
            continue;
        }
        let shape = piece.shape();
        let fg = if session.grid().any_valid_placement(shape) {
            piece.theme.fill()
        } else {
            Color::DarkGray
        };
        let (c0, r0) = view.shape_origin(index, shape);
        let clip = f.area();
        let buf = f.buffer_mut();
        for (sx, sy) in shape.filled_cells() {
            paint_block(
                buf,
                clip,
                i32::from(c0) + sx as i32 * i32::from(CELL_W),
                i32::from(r0) + sy as i32,
                ["█", "█"],
                Style::default().fg(fg),
            );
        }
    }
}

// The dragged piece follows the pointer; a rejected piece glides back to its box
fn render_floating_piece(f: &mut Frame, session: &Session, view: &BoardView) {
    let interaction = session.interaction();
    let cell = view.layout.cell;

    let (index, top_left) = if let Some(drag) = interaction.drag() {
        let (px, py) = drag.pointer;
        let corner = view.to_terminal_corner(
            px - (drag.grab.0 as f32 + 0.5) * cell,
            py - (drag.grab.1 as f32 + 0.5) * cell,
        );
        (drag.index, corner)
    } else if let Some(anim) = interaction.returning() {
        let Some(piece) = session.tray().get(anim.index) else {
            return;
        };
        let start = view.to_terminal_corner(
            anim.start.0 - (anim.grab.0 as f32 + 0.5) * cell,
            anim.start.1 - (anim.grab.1 as f32 + 0.5) * cell,
        );
        let end = view.shape_origin(anim.index, piece.shape());
        let t = anim.progress();
        let corner = (
            lerp(start.0 as f32, f32::from(end.0), t).round() as i32,
            lerp(start.1 as f32, f32::from(end.1), t).round() as i32,
        );
        (anim.index, corner)
    } else {
        return;
    };

    let Some(piece) = session.tray().get(index) else {
        return;
    };
    let clip = f.area();
    let buf = f.buffer_mut();
    for (sx, sy) in piece.shape().filled_cells() {
        paint_block(
            buf,
            clip,
            top_left.0 + sx as i32 * i32::from(CELL_W),
            top_left.1 + sy as i32,
            ["█", "█"],
            Style::default().fg(piece.theme.fill()),
        );
    }
}

fn render_particles(f: &mut Frame, session: &Session, view: &BoardView) {
    let clip = f.area();
    let buf = f.buffer_mut();
    for p in session.particles().iter() {
        let (col, row) = view.to_terminal(p.x, p.y);
        let symbol = if p.size > 6.0 {
            "●"
        } else if p.size > 4.5 {
            "•"
        } else {
            "·"
        };
        let mut style = Style::default().fg(p.theme.fill());
        if p.life_fraction() < 0.35 {
            style = style.add_modifier(Modifier::DIM);
        }
        paint(buf, clip, col, row, symbol, style);
    }
}

fn render_popups(f: &mut Frame, session: &Session, view: &BoardView) {
    let clip = f.area();
    let buf = f.buffer_mut();

    for popup in session.bonus_popups().iter() {
        let text = format!("+{}", popup.points);
        let (col, row) = view.to_terminal(popup.x, popup.y);
        let mut style = Style::default()
            .fg(popup.theme.fill())
            .add_modifier(Modifier::BOLD);
        if popup.alpha() < 0.35 {
            style = style.add_modifier(Modifier::DIM);
        }
        // Right-aligned to the popup anchor
        paint_text(buf, clip, col - text.len() as i32, row, &text, style);
    }

    if let Some(combo) = session.combo_popup() {
        let text = combo.text();
        let (col, row) = view.to_terminal(combo.x, combo.y);
        let mut style = Style::default()
            .fg(combo.theme.fill())
            .bg(combo.theme.stroke());
        if combo.scale > 0.9 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if combo.alpha() < 0.3 {
            style = style.add_modifier(Modifier::DIM);
        }
        paint_text(buf, clip, col - text.len() as i32 / 2, row, &text, style);
    }
}

fn render_info(f: &mut Frame, session: &Session, view: &BoardView) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_H), // Title
            Constraint::Length(8),       // Score and combo
            Constraint::Min(4),          // Controls
        ])
        .split(view.info);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let score = session.score();
    let combo_color = if score.combo > 5 {
        Color::LightMagenta
    } else if score.combo > 2 {
        Color::LightCyan
    } else if score.combo > 0 {
        Color::LightGreen
    } else {
        Color::White
    };

    let lines = vec![
        Line::from(format!("Score: {}", score.score)),
        Line::from(format!("High:  {}", score.high_score.max(score.score))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Combo: {}  x{:.0}", score.combo, score.last_move_mult),
            Style::default().fg(combo_color),
        )),
        Line::from(format!("Best combo: {}", score.highest_combo)),
        Line::from(format!("Misses: {}", score.combo_miss)),
        Line::from(""),
        Line::from(format!(
            "Grid {}x{}  Tray {}",
            session.grid().width(),
            session.grid().height(),
            session.tray().count()
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        info_layout[1],
    );

    let controls = Paragraph::new(format!(
        "Controls:\n\
        Drag a piece from the tray\n\
        onto the grid with the mouse\n\
        Esc: Menu\n\
        Q: Quit\n\
        Sound: {}",
        if session.sound_on() { "on" } else { "off" }
    ))
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

fn high_score_lines(table: &HighScoreTable) -> Vec<Line<'static>> {
    if table.is_empty() {
        return vec![Line::from(Span::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    table
        .entries()
        .iter()
        .enumerate()
        .map(|(rank, e)| {
            Line::from(format!(
                "{}. {:<5} {:>7}  x{:<3} {}x{}/{}",
                rank + 1,
                e.name,
                e.score,
                e.highest_combo,
                e.grid_w,
                e.grid_h,
                e.tray_count
            ))
        })
        .collect()
}

fn render_game_over(f: &mut Frame, session: &Session, board: Rect) {
    let area = centered_rect(90, 70, board);
    f.render_widget(Clear, area);

    let score = session.score();
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Score: {}", score.score)),
        Line::from(format!("Best combo: {}", score.highest_combo)),
        Line::from(""),
    ];

    if session.is_editing_name() {
        lines.push(Line::from("Enter your name:"));
        lines.push(Line::from(Span::styled(
            format!("{}_", session.player_name()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from("Enter: confirm"));
    } else {
        lines.push(Line::from("HIGH SCORES"));
        lines.extend(high_score_lines(session.high_scores()));
        lines.push(Line::from(""));
        lines.push(Line::from("Enter: menu   Q: quit"));
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let settings = session.settings();

    let mut lines = vec![
        Line::from(Span::styled(
            "BLOCK BLASTER",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let label = item.label(settings, session.sound_on());
        if i == app.menu_selected {
            lines.push(Line::from(Span::styled(
                format!("> {label} <"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(label));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("HIGH SCORES"));
    lines.extend(high_score_lines(session.high_scores()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down: select  Enter: choose  Q: quit",
        Style::default().fg(Color::DarkGray),
    )));

    let menu_area = centered_rect(70, 80, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        menu_area,
    );
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
