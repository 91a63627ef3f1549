use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::Instant;

use crate::{
    game::{Control, Game, Input},
    runtime::{EventSource, FpsCounter, Runner, Ticker},
    ui::{Scene, Viewport},
};

/// Drives frames until a quit: drain input, update the game, draw, then
/// wait out the rest of the frame.
pub fn run<B, E, T>(
    terminal: &mut Terminal<B>,
    game: &mut Game,
    runner: &mut Runner<E, T>,
) -> io::Result<()>
where
    B: Backend,
    E: EventSource,
    T: Ticker,
{
    let mut fps = FpsCounter::new();

    loop {
        let frame_start = Instant::now();

        let size = terminal.size()?;
        let viewport = Viewport::new(
            Rect::new(0, 0, size.width, size.height),
            game.config().width as f64,
            game.config().height as f64,
        );
        let inputs: Vec<Input> = runner
            .drain()?
            .iter()
            .filter_map(|ev| Input::from_event(ev, &viewport))
            .collect();

        let now = Instant::now();
        if game.frame(inputs, now) == Control::Quit {
            log::info!("quit requested");
            break;
        }

        let rate = fps.fps();
        terminal.draw(|f| f.render_widget(Scene::new(&*game, now, rate), f.area()))?;
        fps.tick(now);

        runner.pace(frame_start);
    }

    Ok(())
}
