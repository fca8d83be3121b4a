use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tide_chart::{ChartRenderer, GeoPoint};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::registry::Elements;
use crate::state::{PickerState, CHART_COLS, CHART_ROWS, COORD_PLACES};

pub struct PickerOverlay {
    modal: Modal,
    renderer: ChartRenderer,
}

pub struct PickerOverlayProps<'a> {
    pub picker: &'a PickerState,
    pub elements: &'a Elements,
    pub is_focused: bool,
}

impl Default for PickerOverlay {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            renderer: ChartRenderer::default(),
        }
    }
}

impl PickerOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for PickerOverlay {
    type Props<'a> = PickerOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Action::PickerClose],
            KeyCode::Enter | KeyCode::Char(' ') => vec![Action::PickerConfirm],
            KeyCode::Left | KeyCode::Char('h') => cursor_move(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => cursor_move(1, 0),
            KeyCode::Up | KeyCode::Char('k') => cursor_move(0, -1),
            KeyCode::Down | KeyCode::Char('j') => cursor_move(0, 1),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if !props.picker.phase.is_open() || area.width < 40 || area.height < 14 {
            return;
        }

        let modal_area = centered_rect(
            (CHART_COLS + 6).min(area.width.saturating_sub(2)),
            (CHART_ROWS + 6).min(area.height.saturating_sub(2)),
            area,
        );

        let view = props.picker.view();
        let marker = props
            .picker
            .marker
            .map(|(lat, lon)| GeoPoint::new(lat, lon));
        let cursor = props.picker.cursor;
        let lingering = props.picker.linger_ticks > 0;

        let PickerOverlay { modal, renderer } = self;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1),           // Title
                Constraint::Length(CHART_ROWS), // Chart
                Constraint::Length(1),           // Coordinate readout
                Constraint::Length(1),           // Hints
            ])
            .split(content_area);

            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        props.elements.chart_picker.label,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .centered(),
                ),
                chunks[0],
            );

            renderer.render(frame, chunks[1], &view, Some(cursor), marker);

            let readout = if lingering {
                Line::from(Span::styled(
                    "Marker dropped, closing...",
                    Style::default().fg(Color::Rgb(255, 210, 90)),
                ))
                .centered()
            } else {
                match view.cell_to_geo(cursor.0, cursor.1) {
                    Some(point) => Line::from(Span::styled(
                        point.format_fixed(COORD_PLACES),
                        Style::default().fg(Color::Gray),
                    ))
                    .centered(),
                    None => Line::default(),
                }
            };
            frame.render_widget(Paragraph::new(readout), chunks[2]);

            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        props.elements.chart_picker.detail,
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
                        bg: Some(Color::Rgb(18, 24, 34)),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::PickerClose,
                render_content: &mut render_content,
            },
        );
    }
}

fn cursor_move(dx: i16, dy: i16) -> Vec<Action> {
    vec![Action::PickerCursorMove { dx, dy }]
}
