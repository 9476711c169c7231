//! Crossterm drawing of the active scene.
//!
//! Every frame is drawn from scratch inside a synchronized update: the scene,
//! then confetti, then the latest notice and the key hint on the bottom row.
//! Pixel-art cells are two columns wide so pictures keep their proportions.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use lovenote_narrative::application::sequencer::SceneView;
use lovenote_narrative::domain::notice::{Notice, NoticeLevel};
use lovenote_narrative::domain::scene::SceneContent;
use lovenote_narrative::domain::state::{DecoyOffset, ScenePhase};
use lovenote_reveal::domain::artwork::{Artwork, Rgb};
use lovenote_reveal::domain::target::GridCell;

use crate::confetti::Spark;

const PIXEL: &str = "██";
const CURSOR: &str = "▌";
const TEXT_WIDTH: usize = 60;

/// Columns the decoy may travel at full displacement, each way.
const DECOY_COLUMNS: f64 = 16.0;
/// Rows the decoy may travel at full displacement, each way.
const DECOY_ROWS: f64 = 4.0;

const ROSE: Rgb = Rgb::hex(0x00FF_69B4);
const DEEP_ROSE: Rgb = Rgb::hex(0x00FF_1493);
const GREY: Rgb = Rgb::hex(0x0090_9090);
const AMBER: Rgb = Rgb::hex(0x00FF_B347);

/// Everything drawn in one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    /// The active scene.
    pub view: SceneView<'a>,
    /// Confetti currently in the air.
    pub sparks: &'a [Spark],
    /// Notice to show, if any.
    pub notice: Option<&'a Notice>,
    /// Terminal size in columns and rows.
    pub size: (u16, u16),
    /// Layout units that map to full decoy travel.
    pub decoy_bound: f64,
}

/// Draws frames to a terminal (or any writer, in tests).
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
    heart: Artwork,
}

impl<W: Write> Renderer<W> {
    /// Creates a renderer. `heart` is drawn behind the finale headline.
    pub fn new(out: W, heart: Artwork) -> Self {
        Self { out, heart }
    }

    /// Draws one frame and flushes it.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            Hide,
            ResetColor,
            Clear(ClearType::All)
        )?;

        match frame.view.scene.content() {
            SceneContent::Story { artwork, .. } => {
                self.draw_story(frame, artwork.as_ref())?;
            }
            SceneContent::Decision {
                prompt,
                accept_label,
                decline_label,
            } => self.draw_decision(frame, prompt, accept_label, decline_label)?,
            SceneContent::Finale { headline, caption } => {
                self.draw_finale(frame, headline, caption)?;
            }
        }

        for spark in frame.sparks {
            queue!(
                self.out,
                MoveTo(spark.x, spark.y),
                SetForegroundColor(color(spark.color)),
                Print(spark.glyph)
            )?;
        }

        if let Some(notice) = frame.notice {
            self.draw_notice(frame.size, notice)?;
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_story(&mut self, frame: &Frame<'_>, artwork: Option<&Artwork>) -> io::Result<()> {
        let (width, height) = frame.size;
        let mut row: u16 = 1;

        if let Some(artwork) = artwork {
            let grid_width = artwork.grid().width() * 2;
            let left = centered(width, grid_width);
            draw_cells(&mut self.out, artwork, frame.view.cells.iter().copied(), left, row)?;
            row = row.saturating_add(to_u16(artwork.grid().height()) + 1);
        }

        if let Some(text) = frame.view.text {
            let revealing = frame.view.phase == ScenePhase::Revealing;
            let lines = wrap(text, TEXT_WIDTH.min(usize::from(width.saturating_sub(4))));
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines.iter().enumerate() {
                let cursor = if revealing && i == last { CURSOR } else { "" };
                let len = line.chars().count() + cursor.chars().count();
                queue!(
                    self.out,
                    MoveTo(centered(width, len), row),
                    SetForegroundColor(Color::White),
                    Print(line),
                    SetForegroundColor(color(ROSE)),
                    Print(cursor)
                )?;
                row = row.saturating_add(1);
            }
        }

        if frame.view.phase == ScenePhase::Ready {
            self.hint(width, height, "Enter ▸ continuar    q ▸ salir")?;
        }
        Ok(())
    }

    fn draw_decision(
        &mut self,
        frame: &Frame<'_>,
        prompt: &str,
        accept_label: &str,
        decline_label: &str,
    ) -> io::Result<()> {
        let (width, height) = frame.size;
        let middle = height / 2;

        queue!(
            self.out,
            MoveTo(centered(width, prompt.chars().count()), middle.saturating_sub(3)),
            SetForegroundColor(color(DEEP_ROSE)),
            SetAttribute(Attribute::Bold),
            Print(prompt),
            SetAttribute(Attribute::Reset)
        )?;

        let accept = format!("[ {accept_label} ]");
        let accept_len = to_u16(accept.chars().count());
        queue!(
            self.out,
            MoveTo((width / 2).saturating_sub(accept_len + 2), middle),
            SetForegroundColor(color(ROSE)),
            SetAttribute(Attribute::Bold),
            Print(&accept),
            SetAttribute(Attribute::Reset)
        )?;

        let decline = format!("[ {decline_label} ]");
        let (dx, dy) = decoy_cells(frame.view.decoy, frame.decoy_bound);
        let decline_len = i32::from(to_u16(decline.chars().count()));
        let x = clamp_to(
            i32::from(width / 2) + 2 + dx,
            i32::from(width) - decline_len,
        );
        let y = clamp_to(i32::from(middle) + dy, i32::from(height.saturating_sub(3)));
        queue!(
            self.out,
            MoveTo(x, y),
            SetForegroundColor(color(GREY)),
            Print(&decline)
        )?;

        self.hint(width, height, "s ▸ sí    n ▸ no    q ▸ salir")
    }

    fn draw_finale(&mut self, frame: &Frame<'_>, headline: &str, caption: &str) -> io::Result<()> {
        let (width, height) = frame.size;
        let grid = self.heart.grid();
        let heart_width = grid.width() * 2;
        let top = (height / 2).saturating_sub(to_u16(grid.height() / 2) + 1);
        let left = centered(width, heart_width);

        draw_cells(&mut self.out, &self.heart, grid.content_cells(), left, top)?;

        let headline_row = top.saturating_add(to_u16(grid.height() / 3));
        queue!(
            self.out,
            MoveTo(centered(width, headline.chars().count()), headline_row),
            SetForegroundColor(Color::White),
            SetAttribute(Attribute::Bold),
            SetAttribute(Attribute::Reverse),
            Print(headline),
            SetAttribute(Attribute::Reset),
            MoveTo(
                centered(width, caption.chars().count()),
                top.saturating_add(to_u16(grid.height()) + 1)
            ),
            SetForegroundColor(color(ROSE)),
            Print(caption)
        )?;

        self.hint(width, height, "q ▸ salir")
    }

    fn draw_notice(&mut self, size: (u16, u16), notice: &Notice) -> io::Result<()> {
        let (width, height) = size;
        let accent = match notice.level {
            NoticeLevel::Celebration => DEEP_ROSE,
            NoticeLevel::Info => ROSE,
            NoticeLevel::Warning => AMBER,
        };
        let row = height.saturating_sub(4);
        queue!(
            self.out,
            MoveTo(centered(width, notice.title.chars().count()), row),
            SetForegroundColor(color(accent)),
            SetAttribute(Attribute::Bold),
            Print(&notice.title),
            SetAttribute(Attribute::Reset),
            MoveTo(
                centered(width, notice.description.chars().count()),
                row.saturating_add(1)
            ),
            SetForegroundColor(Color::White),
            Print(&notice.description)
        )
    }

    fn hint(&mut self, width: u16, height: u16, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(centered(width, text.chars().count()), height.saturating_sub(1)),
            SetForegroundColor(color(GREY)),
            Print(text)
        )
    }
}

fn draw_cells<W: Write>(
    out: &mut W,
    artwork: &Artwork,
    cells: impl IntoIterator<Item = GridCell>,
    left: u16,
    top: u16,
) -> io::Result<()> {
    for cell in cells {
        let Some(rgb) = artwork.palette().color(cell.value) else {
            continue;
        };
        queue!(
            out,
            MoveTo(
                left.saturating_add(to_u16(cell.col * 2)),
                top.saturating_add(to_u16(cell.row))
            ),
            SetForegroundColor(color(rgb)),
            Print(PIXEL)
        )?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn clamp_to(value: i32, max: i32) -> u16 {
    u16::try_from(value.clamp(0, max.max(0))).unwrap_or(0)
}

/// Column at which text of `len` columns is centred on a `width`-column
/// screen.
#[must_use]
pub fn centered(width: u16, len: usize) -> u16 {
    (width.saturating_sub(to_u16(len))) / 2
}

/// The decoy displacement in terminal cells.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decoy_cells(offset: DecoyOffset, bound: f64) -> (i32, i32) {
    if bound <= 0.0 {
        return (0, 0);
    }
    let scale = |value: f64, cells: f64| (value / bound * cells).round() as i32;
    (scale(offset.x, DECOY_COLUMNS), scale(offset.y, DECOY_ROWS))
}

/// Greedy word wrap at `width` characters. Words longer than a line are
/// split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            lines.push(word.drain(..width).collect());
        }
        let needed = if line_len == 0 {
            word.len()
        } else {
            line_len + 1 + word.len()
        };
        if needed > width && line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
