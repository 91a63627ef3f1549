pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Context, Painter, Shape},
        Paragraph, Widget,
    },
};
use std::time::Instant;

use crate::{
    config::Rgb,
    field::Renderer,
    game::Game,
    stats::SessionStats,
    util::as_millis,
};

const HUD_WIDTH: u16 = 40;
const SUMMARY_WIDTH: u16 = 36;
const SUMMARY_COLOR: Rgb = Rgb(230, 230, 230);
/// Strength of the end-of-session shade, out of 255
const OVERLAY_ALPHA: u8 = 180;

/// Maps terminal cells onto the playfield and back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(area: Rect, width: f64, height: f64) -> Self {
        Self {
            area,
            width,
            height,
        }
    }

    /// Playfield point at the center of the cell, or `None` outside the area.
    pub fn playfield_point(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.area;
        if area.width == 0
            || area.height == 0
            || column < area.left()
            || column >= area.right()
            || row < area.top()
            || row >= area.bottom()
        {
            return None;
        }
        let x = ((column - area.x) as f64 + 0.5) / area.width as f64 * self.width;
        let y = ((row - area.y) as f64 + 0.5) / area.height as f64 * self.height;
        Some((x, y))
    }
}

/// A filled circle on the canvas
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let r = self.radius;
        let step = (r / 24.0).max(0.5);
        let mut dy = -r;
        while dy <= r {
            let half = (r * r - dy * dy).max(0.0).sqrt();
            let mut dx = -half;
            while dx <= half {
                if let Some((px, py)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(px, py, self.color);
                }
                dx += step;
            }
            dy += step;
        }
    }
}

/// Canvas y grows upward, the playfield's grows downward.
struct CanvasRenderer<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
}

impl Renderer for CanvasRenderer<'_, '_> {
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        self.ctx.draw(&Disc {
            x,
            y: self.height - y,
            radius,
            color: color.into(),
        });
    }
}

/// Darkens everything already drawn, standing in for an alpha overlay
#[derive(Debug, Clone, Copy)]
pub struct Shade {
    pub alpha: u8,
}

impl Shade {
    fn darken(&self, color: Color) -> Color {
        let keep = 1.0 - self.alpha as f64 / 255.0;
        let scale = |c: u8| (c as f64 * keep).round() as u8;
        match color {
            Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
            _ => Color::Rgb(0, 0, 0),
        }
    }
}

impl Widget for Shade {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.fg = self.darken(cell.fg);
                    cell.bg = self.darken(cell.bg);
                }
            }
        }
    }
}

pub fn hud_lines(game: &Game, now: Instant, fps: f64) -> Vec<String> {
    let stats = game.stats();
    vec![
        format!("Time: {}", game.clock().format_remaining(now)),
        format!(
            "Hits: {}  Shots: {}  Acc: {:.1}%",
            stats.hits(),
            stats.shots(),
            stats.accuracy()
        ),
        format!("Avg React: {:.0} ms", as_millis(stats.average_reaction())),
        format!("Targets: {}  FPS: {:.0}", game.field().len(), fps),
        "ESC to quit".to_string(),
    ]
}

pub fn summary_lines(stats: &SessionStats) -> Vec<String> {
    let best = match stats.best_reaction() {
        Some(secs) => format!("{:.0} ms", as_millis(secs)),
        None => "-".to_string(),
    };
    vec![
        "Session finished".to_string(),
        format!("Shots: {}  Hits: {}", stats.shots(), stats.hits()),
        format!("Accuracy: {:.1}%", stats.accuracy()),
        format!("Avg Reaction: {:.0} ms", as_millis(stats.average_reaction())),
        format!("Best Reaction: {}", best),
        "Press ESC to exit".to_string(),
    ]
}

/// One frame's worth of game state to put on screen
pub struct Scene<'a> {
    pub game: &'a Game,
    pub now: Instant,
    pub fps: f64,
}

impl<'a> Scene<'a> {
    pub fn new(game: &'a Game, now: Instant, fps: f64) -> Self {
        Self { game, now, fps }
    }

    fn render_field(&self, area: Rect, buf: &mut Buffer) {
        let config = self.game.config();
        let (width, height) = (config.width as f64, config.height as f64);
        let field = self.game.field();

        Canvas::default()
            .marker(Marker::HalfBlock)
            .background_color(config.background.into())
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                field.draw_all(&mut CanvasRenderer { ctx, height });
            })
            .render(area, buf);
    }

    fn render_hud(&self, area: Rect, buf: &mut Buffer) {
        let lines = hud_lines(self.game, self.now, self.fps);
        let hud_area = Rect {
            x: area.x.saturating_add(1),
            y: area.y,
            width: HUD_WIDTH.min(area.width.saturating_sub(1)),
            height: (lines.len() as u16).min(area.height),
        };
        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .style(Style::default().fg(self.game.config().foreground.into()))
            .render(hud_area, buf);
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        Shade {
            alpha: OVERLAY_ALPHA,
        }
        .render(area, buf);

        let lines = summary_lines(self.game.stats());
        let height = (lines.len() as u16).min(area.height);
        let width = SUMMARY_WIDTH.min(area.width);
        let summary_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let mut text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        if let Some(title) = text.first_mut() {
            *title = title.clone().style(Style::default().add_modifier(Modifier::BOLD));
        }
        Paragraph::new(text)
            .style(Style::default().fg(SUMMARY_COLOR.into()))
            .alignment(Alignment::Center)
            .render(summary_area, buf);
    }
}

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.game.phase()).render(&self, area, buf);
    }
}
