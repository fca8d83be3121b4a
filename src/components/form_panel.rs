use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection,
    StatusBarStyle, TextInput, TextInputProps, TextInputStyle, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::icons::spinner_glyph;
use crate::registry::Elements;
use crate::state::{FormField, FormState};

pub struct FormPanel {
    location: TextInput,
    date: TextInput,
    comments: TextInput,
}

pub struct FormPanelProps<'a> {
    pub form: &'a FormState,
    pub submitting: bool,
    pub spinner_frame: u8,
    pub elements: &'a Elements,
    pub is_focused: bool,
}

impl Default for FormPanel {
    fn default() -> Self {
        Self {
            location: TextInput::new(),
            date: TextInput::new(),
            comments: TextInput::new(),
        }
    }
}

impl FormPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_for(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Location => &mut self.location,
            FormField::Date => &mut self.date,
            FormField::Comments => &mut self.comments,
        }
    }

    fn change_ctor(field: FormField) -> fn(String) -> Action {
        match field {
            FormField::Location => Action::location_changed,
            FormField::Date => Action::date_changed,
            FormField::Comments => Action::comments_changed,
        }
    }
}

fn input_style(is_focused: bool) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: if is_focused {
                Some(Color::Rgb(50, 50, 60))
            } else {
                Some(Color::Rgb(36, 36, 44))
            },
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl Component<Action> for FormPanel {
    type Props<'a> = FormPanelProps<'a>;

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
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Tab | KeyCode::Down => return vec![Action::FormFocusNext],
            KeyCode::BackTab | KeyCode::Up => return vec![Action::FormFocusPrev],
            KeyCode::F(2) => return vec![Action::PickerOpen],
            _ => {}
        }

        // Everything else goes to the focused input; Enter submits via the
        // input's own submit hook. A disabled submit re-trigger is a
        // reducer no-op.
        let field = props.form.focus;
        let input_props = TextInputProps {
            value: props.form.value(field),
            placeholder: field_placeholder(props.elements, field),
            is_focused: true,
            style: input_style(true),
            on_change: Self::change_ctor(field),
            on_submit: Action::submit_from_input,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input_for(field)
            .handle_event(event, input_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Form content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let content = centered_rect(64, 22, chunks[0]);
        let rows = Layout::vertical([
            Constraint::Length(5), // FIGlet title
            Constraint::Length(1),
            Constraint::Length(2), // Location
            Constraint::Length(1),
            Constraint::Length(2), // Date
            Constraint::Length(1),
            Constraint::Length(2), // Comments
            Constraint::Length(1),
            Constraint::Length(1), // Submit control
        ])
        .split(content);

        render_title(frame, rows[0]);

        let fields = [
            (FormField::Location, rows[2]),
            (FormField::Date, rows[4]),
            (FormField::Comments, rows[6]),
        ];
        for (field, row) in fields {
            let focused = props.is_focused && props.form.focus == field;
            let halves =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(row);

            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    field_label(props.elements, field),
                    label_style,
                ))),
                halves[0],
            );

            let input_props = TextInputProps {
                value: props.form.value(field),
                placeholder: field_placeholder(props.elements, field),
                is_focused: focused,
                style: input_style(focused),
                on_change: Self::change_ctor(field),
                on_submit: Action::submit_from_input,
                on_cursor_move: Some(|_| Action::Render),
            };
            self.input_for(field).render(frame, halves[1], input_props);
        }

        frame.render_widget(Paragraph::new(submit_line(&props)), rows[8]);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("tab", "next field"),
                    StatusBarHint::new("enter", "cast"),
                    StatusBarHint::new("F2", "chart"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn field_label(elements: &Elements, field: FormField) -> &'static str {
    match field {
        FormField::Location => elements.location.label,
        FormField::Date => elements.date.label,
        FormField::Comments => elements.comments.label,
    }
}

fn field_placeholder(elements: &Elements, field: FormField) -> &'static str {
    match field {
        FormField::Location => elements.location.detail,
        FormField::Date => elements.date.detail,
        FormField::Comments => elements.comments.detail,
    }
}

/// The submit control: default label when armed, busy spinner while a
/// request is in flight.
fn submit_line(props: &FormPanelProps<'_>) -> Line<'static> {
    if props.submitting {
        Line::from(vec![Span::styled(
            format!(
                "{} {}...",
                spinner_glyph(props.spinner_frame),
                props.elements.submit.detail
            ),
            Style::default().fg(Color::DarkGray),
        )])
        .centered()
    } else {
        Line::from(vec![
            Span::styled(
                format!("\u{25b6} {}", props.elements.submit.label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  enter", Style::default().fg(Color::DarkGray)),
        ])
        .centered()
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(Fill::Linear(LinearGradient::horizontal(
            ArtColor::rgb(90, 180, 255),
            ArtColor::rgb(120, 230, 180),
        )));
    frame.render_widget(ArtBox::new(&renderer, "Fishcast"), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormState;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn elements() -> Elements {
        Elements::resolve().expect("complete element table")
    }

    fn props<'a>(form: &'a FormState, elements: &'a Elements, focused: bool) -> FormPanelProps<'a> {
        FormPanelProps {
            form,
            submitting: false,
            spinner_frame: 0,
            elements,
            is_focused: focused,
        }
    }

    #[test]
    fn tab_cycles_focus_forward() {
        let mut component = FormPanel::new();
        let form = FormState::default();
        let elements = elements();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
                props(&form, &elements, true),
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::FormFocusNext]);
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut component = FormPanel::new();
        let form = FormState::default();
        let elements = elements();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
                props(&form, &elements, true),
            )
            .into_iter()
            .collect();
        assert_eq!(
            actions,
            vec![Action::FormFieldChange {
                field: FormField::Location,
                value: "3".into(),
            }]
        );
    }

    #[test]
    fn f2_opens_the_picker() {
        let mut component = FormPanel::new();
        let form = FormState::default();
        let elements = elements();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)),
                props(&form, &elements, true),
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::PickerOpen]);
    }

    #[test]
    fn unfocused_ignores_events() {
        let mut component = FormPanel::new();
        let form = FormState::default();
        let elements = elements();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
                props(&form, &elements, false),
            )
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }
}
