use crate::cycle::Sample;
use crate::pacer::{Flow, SampleSink, Waiter};
use crate::render::{Cell, Color, FrameBuffer, Palette, RenderError, Shape};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use log::debug;
use std::io::{self, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

// Upper bound for a single poll when a wait is too long to express as a deadline.
const MAX_POLL: Duration = Duration::from_secs(3600);

/// The whole terminal, used as a drawing surface.
///
/// Opening it switches to the alternate screen in raw mode; dropping it restores the terminal.
pub(crate) struct TerminalSurface {
    writer: BufWriter<Stdout>,
    shape: Box<dyn Shape>,
    palette: Palette,
    last: Option<FrameBuffer>,
}

impl TerminalSurface {
    pub(crate) fn open(shape: Box<dyn Shape>, palette: Palette) -> Result<Self, RenderError> {
        terminal::enable_raw_mode()?;
        let mut surface = Self { writer: BufWriter::new(io::stdout()), shape, palette, last: None };
        execute!(surface.writer, terminal::EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;
        Ok(surface)
    }
}

impl SampleSink for TerminalSurface {
    fn render(&mut self, sample: &Sample) -> Result<(), RenderError> {
        let (cols, rows) = terminal::size()?;
        let frame = FrameBuffer::paint(self.shape.as_ref(), sample, &self.palette, rows, cols);
        match &self.last {
            Some(last) if *last == frame => return Ok(()),
            Some(last) if (last.rows(), last.cols()) != (rows, cols) => {
                debug!("terminal resized to {cols}x{rows}");
                queue!(self.writer, terminal::Clear(ClearType::All))?;
            }
            _ => (),
        };
        write_frame(&mut self.writer, &frame, self.palette.backdrop)?;
        self.last = Some(frame);
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn terminal_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Write every cell of a frame, only emitting color changes when they're needed.
fn write_frame<W: Write>(writer: &mut W, frame: &FrameBuffer, backdrop: Option<Color>) -> io::Result<()> {
    for row in 0..frame.rows() {
        queue!(writer, cursor::MoveTo(0, row))?;
        let mut current = None;
        for cell in frame.row(row) {
            let (background, foreground, glyph) = match *cell {
                Cell::Empty => (backdrop, None, ' '),
                Cell::Full(color) => (Some(color), None, ' '),
                Cell::LowerHalf(color) => (backdrop, Some(color), '▄'),
            };
            if current != Some((background, foreground)) {
                queue!(writer, ResetColor)?;
                if let Some(color) = background {
                    queue!(writer, SetBackgroundColor(terminal_color(color)))?;
                }
                if let Some(color) = foreground {
                    queue!(writer, SetForegroundColor(terminal_color(color)))?;
                }
                current = Some((background, foreground));
            }
            queue!(writer, Print(glyph))?;
        }
    }
    queue!(writer, ResetColor)?;
    writer.flush()
}

/// Waits by polling the keyboard, so that `q`, `Esc` or `Ctrl-C` can interrupt a run and `r`
/// can restart it.
#[derive(Debug, Default)]
pub(crate) struct KeyboardWaiter;

impl Waiter for KeyboardWaiter {
    fn wait(&mut self, duration: Duration) -> Result<Flow, RenderError> {
        let deadline = Instant::now().checked_add(duration);
        loop {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => MAX_POLL,
            };
            if remaining.is_zero() || !event::poll(remaining)? {
                if deadline.is_some() {
                    return Ok(Flow::Continue);
                }
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if let Some(flow) = key_flow(&key) {
                    debug!("{flow:?} requested");
                    return Ok(flow);
                }
            }
        }
    }
}

fn key_flow(key: &KeyEvent) -> Option<Flow> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Flow::Stop),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Flow::Stop),
        KeyCode::Char('r') => Some(Flow::Restart),
        _ => None,
    }
}
