mod field;
mod render;
mod term;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use field::{BACKGROUND, BAND_HEIGHT, FIELD_WIDTH, ThreadField, TRAIL_ALPHA};
use render::canvas::{Canvas, Vec2};
use render::legend;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use term::Presenter;

#[derive(Parser, Debug)]
#[command(name = "perpetual-loom")]
#[command(about = "Ten sustainability-metric threads weaving across an animated terminal canvas", long_about = None)]
struct Args {
    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    fps: u64,

    /// Seed for the per-thread shape parameters; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    execute!(
        stdout,
        EnterAlternateScreen,
        DisableLineWrap,
        cursor::Hide,
        EnableMouseCapture
    )
    .context("failed to set up terminal")?;

    let result = run(&mut stdout, args);

    let _ = execute!(
        stdout,
        DisableMouseCapture,
        ResetColor,
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();

    result
}

fn run(stdout: &mut Stdout, args: Args) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    if cols < 40 || rows < 15 {
        bail!("terminal too small: need at least 40x15, got {cols}x{rows}");
    }

    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut field = ThreadField::new(&mut rng)?;

    let mut presenter = Presenter::new(cols, rows);
    let band_rows = presenter.band_rows();
    let (device_w, device_h) = presenter.device_size();
    let mut canvas = Canvas::new(device_w, device_h, FIELD_WIDTH, BAND_HEIGHT);
    canvas.fill(BACKGROUND);
    presenter.clear_all(stdout)?;

    let fps = args.fps.clamp(10, 240);
    let frame_dt = Duration::from_millis((1000.0 / fps as f32).round() as u64);
    let mut next_frame = Instant::now();

    // Off-canvas until the first mouse event, so nothing starts hovered
    let mut pointer = Vec2::new(-FIELD_WIDTH, -BAND_HEIGHT);
    let mut pointer_cell = (0u16, 0u16);

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        pointer_cell = (mouse.column, mouse.row);
                        pointer = Presenter::pointer_to_logical(cols, band_rows, pointer_cell);
                    }
                }
                Event::Resize(..) => {
                    // Layout is fixed at startup by design
                    bail!("terminal was resized; please restart");
                }
                _ => {}
            }
        }

        canvas.fade(BACKGROUND, TRAIL_ALPHA);
        field.frame(&mut canvas, pointer);

        let mut spans = legend::legend_spans(field.threads(), cols, band_rows);
        if let Some(thread) = field.hovered() {
            spans.extend(legend::tooltip_spans(
                &thread.metric.to_string(),
                pointer_cell,
                cols,
            ));
        }
        presenter.draw(stdout, &canvas, &spans)?;

        let now = Instant::now();
        if now < next_frame {
            std::thread::sleep(next_frame - now);
        }
        next_frame += frame_dt;
    }
}
