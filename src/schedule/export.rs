//! Raster export of the weekly grid.
//!
//! The picture follows the on-screen table: an accent-colored header row with
//! `Time` and the day names, a time column, and one accent box per occupied
//! cell holding the class code and room. Text is drawn from the 8x8 bitmap
//! font scaled to the selected font size.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use font8x8::{UnicodeFonts, BASIC_FONTS};

use super::customization::{Customization, Rgb};
use super::day::DayName;
use super::render::GridView;

pub const EXPORT_FILE_NAME: &str = "my-schedule.png";

const PAD: u32 = 8;
const BOX_PAD: u32 = 4;
const LINE_GAP: u32 = 4;
const MAX_CELL_CHARS: usize = 16;
const GLYPH: u32 = 8;

/// Write the grid to `<dir>/my-schedule.png`. Returns `Ok(None)` without
/// touching the filesystem when there is no rendered grid to capture.
pub fn export_png(
    view: Option<&GridView>,
    customization: &Customization,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(view) = view else {
        tracing::debug!("nothing rendered yet, skipping export");
        return Ok(None);
    };

    let bytes = encode_png(view, customization)?;
    fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, bytes).wrap_err_with(|| format!("writing {}", path.display()))?;

    tracing::info!(path = %path.display(), "exported schedule");
    Ok(Some(path))
}

pub fn encode_png(view: &GridView, customization: &Customization) -> Result<Vec<u8>> {
    let canvas = paint(view, customization);

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, canvas.width, canvas.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().wrap_err("writing PNG header")?;
    writer
        .write_image_data(&canvas.pixels)
        .wrap_err("encoding PNG data")?;
    writer.finish().wrap_err("finishing PNG stream")?;
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Metrics {
    pub font: u32,
    pub small: u32,
    pub time_w: u32,
    pub col_w: u32,
    pub header_h: u32,
    pub row_h: u32,
    pub width: u32,
    pub height: u32,
}

impl Metrics {
    pub(crate) fn new(view: &GridView, customization: &Customization) -> Self {
        let font = customization.font_size.px();
        let small = (font * 3 / 4).max(GLYPH);

        let (mut code_len, mut room_len) = (0, 0);
        for cell in view.rows.iter().flat_map(|row| row.cells.iter().flatten()) {
            code_len = code_len.max(cell.code.chars().count().min(MAX_CELL_CHARS) as u32);
            room_len = room_len.max(cell.room.chars().count().min(MAX_CELL_CHARS) as u32);
        }
        let day_label = DayName::ALL
            .iter()
            .map(|d| d.name().len())
            .max()
            .unwrap_or(0) as u32;

        let content_w = (day_label * font)
            .max(code_len * font + 2 * BOX_PAD)
            .max(room_len * small + 2 * BOX_PAD);

        let time_w = "21:00".len() as u32 * font + 2 * PAD;
        let col_w = content_w + 2 * PAD;
        let header_h = font + 2 * PAD;
        let row_h = font + LINE_GAP + small + 2 * BOX_PAD + 2 * PAD;

        Self {
            font,
            small,
            time_w,
            col_w,
            header_h,
            row_h,
            width: time_w + 7 * col_w + 1,
            height: header_h + view.rows.len() as u32 * row_h + 1,
        }
    }

    pub(crate) fn column_x(&self, day: DayName) -> u32 {
        self.time_w + day.index() as u32 * self.col_w
    }

    pub(crate) fn row_y(&self, row: usize) -> u32 {
        self.header_h + row as u32 * self.row_h
    }
}

fn paint(view: &GridView, customization: &Customization) -> Canvas {
    let m = Metrics::new(view, customization);
    let bg = customization.background_color;
    let fg = customization.text_color;
    let accent = customization.accent_color;
    let border = bg.mix(fg, 0.2);

    let mut canvas = Canvas::new(m.width, m.height, bg);

    canvas.fill_rect(0, 0, m.width, m.header_h, accent);
    canvas.draw_text_centered(0, PAD, m.time_w, "Time", m.font, fg);
    for day in DayName::ALL {
        canvas.draw_text_centered(m.column_x(day), PAD, m.col_w, day.name(), m.font, fg);
    }

    for (i, row) in view.rows.iter().enumerate() {
        let y = m.row_y(i);
        canvas.draw_text(PAD, y + PAD, &row.hour.to_string(), m.font, fg, m.time_w - PAD);

        for day in DayName::ALL {
            let Some(cell) = &row.cells[day.index()] else {
                continue;
            };
            let x = m.column_x(day);
            let box_w = m.col_w - 2 * PAD;
            canvas.fill_rect(x + PAD, y + PAD, box_w, m.row_h - 2 * PAD, accent);

            let text_x = x + PAD + BOX_PAD;
            let text_w = box_w - 2 * BOX_PAD;
            canvas.draw_text(text_x, y + PAD + BOX_PAD, &cell.code, m.font, fg, text_w);
            canvas.draw_text(
                text_x,
                y + PAD + BOX_PAD + m.font + LINE_GAP,
                &cell.room,
                m.small,
                fg,
                text_w,
            );
        }
    }

    // Cell borders.
    canvas.fill_rect(0, m.header_h, m.width, 1, border);
    for i in 1..=view.rows.len() {
        canvas.fill_rect(0, m.row_y(i), m.width, 1, border);
    }
    canvas.fill_rect(m.time_w, 0, 1, m.height, border);
    for day in DayName::ALL {
        canvas.fill_rect(m.column_x(day) + m.col_w, 0, 1, m.height, border);
    }
    canvas.fill_rect(0, 0, m.width, 1, border);
    canvas.fill_rect(0, 0, 1, m.height, border);

    canvas
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let pixels = [fill.r, fill.g, fill.b].repeat((width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 3) as usize;
        self.pixels[i..i + 3].copy_from_slice(&[color.r, color.g, color.b]);
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                self.put(px, py, color);
            }
        }
    }

    /// Draw `text` with `size`-pixel glyphs, dropping characters that would
    /// cross `max_w`.
    fn draw_text(&mut self, x: u32, y: u32, text: &str, size: u32, color: Rgb, max_w: u32) {
        let fit = (max_w / size) as usize;
        for (i, c) in text.chars().take(fit).enumerate() {
            let glyph = BASIC_FONTS
                .get(c)
                .or_else(|| BASIC_FONTS.get('?'))
                .unwrap_or([0; 8]);
            let origin = x + i as u32 * size;
            for dy in 0..size {
                let bits = glyph[(dy * GLYPH / size) as usize];
                for dx in 0..size {
                    if bits & (1 << (dx * GLYPH / size)) != 0 {
                        self.put(origin + dx, y + dy, color);
                    }
                }
            }
        }
    }

    fn draw_text_centered(&mut self, x: u32, y: u32, w: u32, text: &str, size: u32, color: Rgb) {
        let text_w = text.chars().count() as u32 * size;
        let offset = w.saturating_sub(text_w) / 2;
        self.draw_text(x + offset, y, text, size, color, w);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::schedule::{project, ClassRecord, FontSize, HourLabel, ScheduleState};

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> Rgb {
        let i = ((y * width + x) * 3) as usize;
        Rgb::new(buf[i], buf[i + 1], buf[i + 2])
    }

    fn sample_view() -> GridView {
        let mut state = ScheduleState::new();
        state.add_class(&ClassRecord::samples()[0]);
        project(&state)
    }

    #[test]
    fn encodes_an_rgb_png_of_the_full_grid() {
        let view = sample_view();
        let custom = Customization::default();
        let bytes = encode_png(&view, &custom).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let (info, _) = decode(&bytes);
        let m = Metrics::new(&view, &custom);
        assert_eq!((info.width, info.height), (m.width, m.height));
        assert_eq!(info.color_type, png::ColorType::Rgb);
    }

    #[test]
    fn uses_live_customization_colors() {
        let view = sample_view();
        let custom = Customization {
            background_color: Rgb::new(0x10, 0x20, 0x30),
            text_color: Rgb::WHITE,
            accent_color: Rgb::new(0xe0, 0x40, 0x10),
            font_size: FontSize::Large,
        };
        let (info, buf) = decode(&encode_png(&view, &custom).unwrap());
        let m = Metrics::new(&view, &custom);

        // header padding
        assert_eq!(pixel(&buf, info.width, 2, 2), custom.accent_color);

        // occupied Monday 09:00 box vs. empty Tuesday 09:00
        let nine = HourLabel::new(9).unwrap().index();
        let y = m.row_y(nine) + PAD + 1;
        assert_eq!(
            pixel(&buf, info.width, m.column_x(DayName::Monday) + PAD + 1, y),
            custom.accent_color
        );
        assert_eq!(
            pixel(&buf, info.width, m.column_x(DayName::Tuesday) + PAD + 1, y),
            custom.background_color
        );
    }

    #[test]
    fn font_size_scales_the_image() {
        let view = sample_view();
        let small = Metrics::new(&view, &Customization { font_size: FontSize::Small, ..Default::default() });
        let large = Metrics::new(
            &view,
            &Customization { font_size: FontSize::ExtraLarge, ..Default::default() },
        );
        assert!(large.width > small.width);
        assert!(large.height > small.height);
    }

    #[test]
    fn export_without_rendered_grid_is_a_no_op() {
        let dir = std::env::temp_dir().join(format!("schedule-tui-noop-{}", std::process::id()));
        let result = export_png(None, &Customization::default(), &dir).unwrap();
        assert!(result.is_none());
        assert!(!dir.join(EXPORT_FILE_NAME).exists());
    }

    #[test]
    fn export_writes_fixed_file_name() {
        let dir = std::env::temp_dir().join(format!("schedule-tui-export-{}", std::process::id()));
        let view = sample_view();
        let path = export_png(Some(&view), &Customization::default(), &dir)
            .unwrap()
            .unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
