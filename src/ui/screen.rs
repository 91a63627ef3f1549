use ratatui::{buffer::Buffer, layout::Rect};

use crate::{game::Phase, ui::Scene};

/// A UI Screen boundary: everything drawn for one game phase
pub trait Screen {
    fn render(&self, scene: &Scene, area: Rect, buf: &mut Buffer);
}

/// Targets plus the live HUD
pub struct RunningScreen;

impl Screen for RunningScreen {
    fn render(&self, scene: &Scene, area: Rect, buf: &mut Buffer) {
        scene.render_field(area, buf);
        scene.render_hud(area, buf);
    }
}

/// The frozen playfield, shaded, with the session summary on top
pub struct FinishedScreen;

impl Screen for FinishedScreen {
    fn render(&self, scene: &Scene, area: Rect, buf: &mut Buffer) {
        scene.render_field(area, buf);
        scene.render_hud(area, buf);
        scene.render_summary(area, buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Running => Box::new(RunningScreen),
        Phase::Finished => Box::new(FinishedScreen),
    }
}
