//! Widgets for the distribution grid
//!
//! Both widgets are plain values built from a [`DigitView`] and the theme,
//! so drawing the same inputs twice produces the same buffer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::stats::{Category, DigitView, MAX_DIAMETER};
use crate::theme::{swatch, CategoryStyle, ThemeMode};

/// Smallest box that still fits "100.0%" inside its borders
const MIN_INDICATOR_WIDTH: u16 = 8;
const MIN_INDICATOR_HEIGHT: u16 = 4;

/// Text drawn on top of indicator fills
const ON_FILL: Color = Color::White;

/// One digit: live marker, sized indicator, count label
#[derive(Debug, Clone, Copy)]
pub struct DigitCircle {
    pub view: DigitView,
    pub theme: ThemeMode,
}

impl DigitCircle {
    pub fn new(view: DigitView, theme: ThemeMode) -> Self {
        Self { view, theme }
    }

    /// Indicator box for the given space, scaled by diameter and centered
    fn indicator_area(&self, space: Rect) -> Rect {
        let scale = self.view.diameter / MAX_DIAMETER;
        let scaled = |len: u16, min: u16| -> u16 {
            let len_scaled = (f64::from(len) * scale).round() as u16;
            len_scaled.max(min).min(len)
        };

        let width = scaled(space.width, MIN_INDICATOR_WIDTH);
        let height = scaled(space.height, MIN_INDICATOR_HEIGHT);
        Rect {
            x: space.x + (space.width - width) / 2,
            y: space.y + (space.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for DigitCircle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width == 0 {
            return;
        }

        let chrome = self.theme.chrome();
        let style = CategoryStyle::for_category(self.view.category, self.theme);
        let active = self.view.is_active();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Live marker
                Constraint::Min(1),    // Indicator
                Constraint::Length(1), // Count label
            ])
            .split(area);

        if active {
            Paragraph::new(Span::styled("↓", Style::default().fg(chrome.active_text)))
                .alignment(Alignment::Center)
                .render(chunks[0], buf);
        }

        let border_type = if style.ring {
            BorderType::Double
        } else if style.glow > 0.0 {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };
        let mut digit_style = Style::default().fg(ON_FILL).add_modifier(Modifier::BOLD);
        if active {
            digit_style = digit_style.add_modifier(Modifier::SLOW_BLINK);
        }

        let indicator = self.indicator_area(chunks[1]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(style.border))
            .style(Style::default().bg(style.fill));
        let inner = block.inner(indicator);
        block.render(indicator, buf);

        // Vertically center the two content lines
        let mut lines = vec![Line::from(""); inner.height.saturating_sub(2) as usize / 2];
        lines.push(Line::from(Span::styled(self.view.digit.to_string(), digit_style)));
        lines.push(Line::from(Span::styled(
            format!("{:.1}%", self.view.percentage),
            Style::default().fg(ON_FILL),
        )));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);

        let count_style = if active {
            Style::default().fg(chrome.active_text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(chrome.text)
        };
        Paragraph::new(Span::styled(format!("Count: {}", self.view.count), count_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Category legend. Swatches are fixed; only label text follows the theme.
#[derive(Debug, Clone, Copy)]
pub struct Legend {
    pub theme: ThemeMode,
}

impl Legend {
    const ENTRIES: [Category; 4] = [
        Category::Top,
        Category::Second,
        Category::Bottom,
        Category::Active,
    ];
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.theme.chrome().text;

        let spans: Vec<Span> = Self::ENTRIES
            .iter()
            .filter_map(|category| category.label().map(|label| (*category, label)))
            .enumerate()
            .flat_map(|(i, (category, label))| {
                let (fill, border) = swatch(category);
                let gap = if i == 0 { "" } else { "   " };
                vec![
                    Span::raw(gap),
                    Span::styled("●", Style::default().fg(fill).bg(border)),
                    Span::styled(format!(" {}", label), Style::default().fg(text)),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Digit;

    fn view(category: Category, percentage: f64) -> DigitView {
        DigitView {
            digit: Digit::new(3).unwrap(),
            count: 12,
            percentage,
            category,
            diameter: crate::stats::diameter(percentage),
        }
    }

    fn render(widget: impl Widget, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        widget.render(buf.area, &mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_digit_percentage_and_count() {
        let buf = render(DigitCircle::new(view(Category::Top, 42.0), ThemeMode::Dark), 16, 10);
        let content = text(&buf);
        assert!(content.contains('3'));
        assert!(content.contains("42.0%"));
        assert!(content.contains("Count: 12"));
        assert!(!content.contains('↓'));
        assert!(content.contains('┏'));
    }

    #[test]
    fn test_active_digit_has_marker_and_double_border() {
        let buf = render(DigitCircle::new(view(Category::Active, 10.0), ThemeMode::Light), 16, 10);
        let content = text(&buf);
        assert!(content.contains('↓'));
        assert!(content.contains('╔'));
    }

    #[test]
    fn test_default_digit_uses_rounded_border() {
        let buf = render(DigitCircle::new(view(Category::Default, 0.0), ThemeMode::Dark), 16, 10);
        assert!(text(&buf).contains('╭'));
    }

    #[test]
    fn test_indicator_grows_with_percentage() {
        let space = Rect::new(0, 0, 20, 10);
        let small = DigitCircle::new(view(Category::Default, 0.0), ThemeMode::Dark).indicator_area(space);
        let large = DigitCircle::new(view(Category::Default, 90.0), ThemeMode::Dark).indicator_area(space);

        assert_eq!(small.width, 10);
        assert_eq!(small.height, 5);
        assert_eq!(large, space);
        assert!(space.contains(small.as_position()));
    }

    #[test]
    fn test_indicator_never_exceeds_space() {
        let tiny = Rect::new(2, 2, 5, 3);
        let area = DigitCircle::new(view(Category::Top, 100.0), ThemeMode::Dark).indicator_area(tiny);
        assert_eq!(area, tiny);
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let circle = DigitCircle::new(view(Category::Second, 33.3), ThemeMode::Dark);
        assert_eq!(render(circle, 14, 9), render(circle, 14, 9));
    }

    #[test]
    fn test_legend_lists_all_categories() {
        let buf = render(Legend { theme: ThemeMode::Dark }, 80, 1);
        let content = text(&buf);
        for label in ["Most Appearing", "2nd Most", "Least Appearing", "Live Digit"] {
            assert!(content.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_legend_swatches_ignore_theme() {
        let dark = render(Legend { theme: ThemeMode::Dark }, 80, 1);
        let light = render(Legend { theme: ThemeMode::Light }, 80, 1);

        let swatches = |buf: &Buffer| -> Vec<Color> {
            buf.content()
                .iter()
                .filter(|cell| cell.symbol() == "●")
                .map(|cell| cell.fg)
                .collect()
        };
        assert_eq!(swatches(&dark).len(), 4);
        assert_eq!(swatches(&dark), swatches(&light));
    }
}
