use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::icons::{self, spinner_glyph};
use crate::markup;
use crate::registry::Elements;
use crate::state::{Forecast, OverlayPhase};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub struct ForecastOverlay {
    modal: Modal,
}

pub struct ForecastOverlayProps<'a> {
    pub forecast: &'a DataResource<Forecast>,
    pub phase: OverlayPhase,
    pub scroll: u16,
    pub spinner_frame: u8,
    pub elements: &'a Elements,
    pub is_focused: bool,
}

impl Default for ForecastOverlay {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ForecastOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ForecastOverlay {
    type Props<'a> = ForecastOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return Vec::new();
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => vec![Action::OverlayClose],
                    KeyCode::Up => vec![Action::OverlayScroll(-1)],
                    KeyCode::Down => vec![Action::OverlayScroll(1)],
                    KeyCode::PageUp => vec![Action::OverlayScroll(-5)],
                    KeyCode::PageDown => vec![Action::OverlayScroll(5)],
                    _ => Vec::new(),
                }
            }
            EventKind::Scroll { delta, .. } => {
                if *delta == 0 {
                    Vec::new()
                } else {
                    vec![Action::OverlayScroll((*delta).signum() as i16)]
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if !props.phase.is_open() || area.width < 30 || area.height < 12 {
            return;
        }

        let modal_area = centered_rect(
            area.width.saturating_sub(8).min(72),
            area.height.saturating_sub(4).min(24),
            area,
        );

        // Mid-transition frames paint dimmer; the settled overlay is full
        // strength.
        let bg = if props.phase.is_visible() {
            Color::Rgb(24, 28, 38)
        } else {
            Color::Rgb(14, 17, 24)
        };

        let ForecastOverlay { modal } = self;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1),
                Constraint::Min(1), // Body
                Constraint::Length(1),
            ])
            .split(content_area);

            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        props.elements.forecast_panel.label,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .centered(),
                ),
                chunks[0],
            );

            // Exactly one of spinner, content, or error paints: revealing
            // the content structurally hides the spinner.
            match props.forecast {
                DataResource::Loading | DataResource::Empty => {
                    render_spinner(frame, chunks[2], props.spinner_frame);
                }
                DataResource::Failed(message) => render_error(frame, chunks[2], message),
                DataResource::Loaded(forecast) => {
                    render_forecast(frame, chunks[2], forecast, props.scroll);
                }
            }

            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        props.elements.forecast_panel.detail,
                        Style::default().fg(Color::DarkGray),
                    ))
                    .centered(),
                ),
                chunks[3],
            );
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(bg),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::OverlayClose,
                render_content: &mut render_content,
            },
        );
    }
}

fn render_spinner(frame: &mut Frame, area: Rect, spinner_frame: u8) {
    let chunks = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                spinner_glyph(spinner_frame).to_string(),
                Style::default().fg(Color::Cyan),
            ))
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "Reading the water...",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ),
        chunks[2],
    );
}

/// Fixed-shape failure panel: the message lands verbatim.
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(2), // message
        Constraint::Min(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            ))
            .centered(),
        )
        .wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn render_forecast(frame: &mut Frame, area: Rect, forecast: &Forecast, scroll: u16) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Conditions grid
        Constraint::Length(1),
        Constraint::Min(1), // Narrative
    ])
    .split(area);

    render_grid(frame, chunks[0], forecast);

    frame.render_widget(
        Paragraph::new(narrative_text(&forecast.forecast_text))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[2],
    );
}

/// The five conditions in fixed order, values verbatim.
fn render_grid(frame: &mut Frame, area: Rect, forecast: &Forecast) {
    let items: [(&str, &str, String); 5] = [
        (
            icons::condition_glyph(&forecast.weather.condition),
            "Weather",
            forecast.weather.condition.clone(),
        ),
        (icons::TEMPERATURE, "Temp", forecast.weather.temp.clone()),
        (icons::WIND, "Wind", forecast.weather.wind.clone()),
        (
            icons::TIDES,
            "Tides",
            format!("H {} / L {}", forecast.tides.high, forecast.tides.low),
        ),
        (icons::WAVES, "Waves", forecast.waves.clone()),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);
    for ((glyph, label, value), column) in items.into_iter().zip(columns.iter()) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(*column);

        frame.render_widget(Paragraph::new(Line::from(glyph).centered()), rows[0]);
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))).centered(),
            ),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    value,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .centered(),
            ),
            rows[2],
        );
    }
}

/// Narrative sections to styled text: emphasized headings, one paragraph
/// per section.
fn narrative_text(raw: &str) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for section in markup::parse_sections(raw) {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        if let Some(heading) = section.heading {
            lines.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        for line in section.lines {
            lines.push(Line::from(line));
        }
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::DataResource;

    fn elements() -> Elements {
        Elements::resolve().expect("complete element table")
    }

    #[test]
    fn esc_closes_the_overlay() {
        let mut component = ForecastOverlay::new();
        let elements = elements();
        let forecast = DataResource::Loaded(Forecast::default());
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Visible,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::OverlayClose]);
    }

    #[test]
    fn arrows_scroll_the_narrative() {
        let mut component = ForecastOverlay::new();
        let elements = elements();
        let forecast = DataResource::Loaded(Forecast::default());
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Visible,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::OverlayScroll(1)]);
    }

    #[test]
    fn narrative_headings_emphasized_once() {
        let text = narrative_text("**Summary**\nGood day.");
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[0].spans[0].content.as_ref(), "Summary");
        assert!(text.lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
        assert_eq!(text.lines[1].spans[0].content.as_ref(), "Good day.");
    }
}
