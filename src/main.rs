//! Fishcast - fishing forecast TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use fishcast::action::Action;
use fishcast::api;
use fishcast::components::{
    Component, ForecastOverlay, ForecastOverlayProps, FormPanel, FormPanelProps, PickerOverlay,
    PickerOverlayProps,
};
use fishcast::effect::Effect;
use fishcast::reducer::reducer;
use fishcast::registry::Elements;
use fishcast::state::{AppState, CHART_COLS, CHART_ROWS, TICK_MS};

/// Fishcast - fishing forecast TUI
#[derive(Parser, Debug)]
#[command(name = "fishcast")]
#[command(about = "Weather, tide, and wave forecasts for a day of fishing")]
struct Args {
    /// Forecast endpoint (also FISHCAST_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Prefill the location field
    #[arg(long)]
    location: Option<String>,

    /// Prefill the fishing date (defaults to today)
    #[arg(long)]
    date: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(Clone, Debug)]
struct RuntimeConfig {
    endpoint: String,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum FishcastComponentId {
    Form,
    Overlay,
    Picker,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum FishcastContext {
    Main,
    Overlay,
    Picker,
}

impl EventRoutingState<FishcastComponentId, FishcastContext> for AppState {
    fn focused(&self) -> Option<FishcastComponentId> {
        self.modal().or(Some(FishcastComponentId::Form))
    }

    fn modal(&self) -> Option<FishcastComponentId> {
        if self.picker.phase.is_open() {
            Some(FishcastComponentId::Picker)
        } else if self.overlay.is_open() {
            Some(FishcastComponentId::Overlay)
        } else {
            None
        }
    }

    fn binding_context(&self, id: FishcastComponentId) -> FishcastContext {
        match id {
            FishcastComponentId::Form => FishcastContext::Main,
            FishcastComponentId::Overlay => FishcastContext::Overlay,
            FishcastComponentId::Picker => FishcastContext::Picker,
        }
    }

    fn default_context(&self) -> FishcastContext {
        FishcastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        endpoint,
        location,
        date,
        debug: debug_args,
    } = Args::parse();

    // All required elements resolve or nothing is wired at all.
    let elements = match Elements::resolve() {
        Ok(elements) => elements,
        Err(err) => {
            eprintln!("Error: could not wire the form: {err}");
            std::process::exit(1);
        }
    };

    let config = Arc::new(RuntimeConfig {
        endpoint: endpoint
            .or_else(|| std::env::var("FISHCAST_ENDPOINT").ok())
            .unwrap_or_else(|| api::DEFAULT_ENDPOINT.to_string()),
    });

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;

    if let Some(location) = location {
        state.form.location = location;
    }
    if state.form.fishing_date.is_empty() {
        state.form.fishing_date =
            date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, elements, config, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct FishcastUi {
    elements: Elements,
    form: FormPanel,
    overlay: ForecastOverlay,
    picker: PickerOverlay,
}

impl FishcastUi {
    fn new(elements: Elements) -> Self {
        Self {
            elements,
            form: FormPanel::new(),
            overlay: ForecastOverlay::new(),
            picker: PickerOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<FishcastComponentId>,
    ) {
        event_ctx.set_component_area(FishcastComponentId::Form, area);

        let overlay_open = state.overlay.is_open();
        let picker_open = state.picker.phase.is_open();

        let form_props = FormPanelProps {
            form: &state.form,
            submitting: state.submitting,
            spinner_frame: state.spinner_frame,
            elements: &self.elements,
            is_focused: render_ctx.is_focused() && !overlay_open && !picker_open,
        };
        self.form.render(frame, area, form_props);

        if overlay_open {
            let modal_area = centered_rect(
                area.width.saturating_sub(8).min(72),
                area.height.saturating_sub(4).min(24),
                area,
            );
            event_ctx.set_component_area(FishcastComponentId::Overlay, modal_area);
            let props = ForecastOverlayProps {
                forecast: &state.forecast,
                phase: state.overlay,
                scroll: state.overlay_scroll,
                spinner_frame: state.spinner_frame,
                elements: &self.elements,
                is_focused: render_ctx.is_focused() && !picker_open,
            };
            self.overlay.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&FishcastComponentId::Overlay);
        }

        if picker_open {
            let modal_area = centered_rect(
                (CHART_COLS + 6).min(area.width.saturating_sub(2)),
                (CHART_ROWS + 6).min(area.height.saturating_sub(2)),
                area,
            );
            event_ctx.set_component_area(FishcastComponentId::Picker, modal_area);
            let props = PickerOverlayProps {
                picker: &state.picker,
                elements: &self.elements,
                is_focused: render_ctx.is_focused(),
            };
            self.picker.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&FishcastComponentId::Picker);
        }
    }

    fn handle_form_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = FormPanelProps {
            form: &state.form,
            submitting: state.submitting,
            spinner_frame: state.spinner_frame,
            elements: &self.elements,
            is_focused: true,
        };
        let actions: Vec<_> = self.form.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_overlay_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ForecastOverlayProps {
            forecast: &state.forecast,
            phase: state.overlay,
            scroll: state.overlay_scroll,
            spinner_frame: state.spinner_frame,
            elements: &self.elements,
            is_focused: true,
        };
        let actions: Vec<_> = self.overlay.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_picker_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = PickerOverlayProps {
            picker: &state.picker,
            elements: &self.elements,
            is_focused: true,
        };
        let actions: Vec<_> = self.picker.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    elements: Elements,
    config: Arc<RuntimeConfig>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(FishcastUi::new(elements)));
    let mut bus: EventBus<AppState, Action, FishcastComponentId, FishcastContext> = EventBus::new();
    let keybindings: Keybindings<FishcastContext> = Keybindings::new();

    let ui_form = Rc::clone(&ui);
    bus.register(FishcastComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_overlay = Rc::clone(&ui);
    bus.register(FishcastComponentId::Overlay, move |event, state| {
        ui_overlay
            .borrow_mut()
            .handle_overlay_event(&event.kind, state)
    });

    let ui_picker = Rc::clone(&ui);
    bus.register(FishcastComponentId::Picker, move |event, state| {
        ui_picker
            .borrow_mut()
            .handle_picker_event(&event.kind, state)
    });

    // Track terminal size for layout decisions; redraw either way.
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => HandlerResponse {
            actions: vec![Action::UiTerminalResize(width, height)],
            consumed: false,
            needs_render: true,
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&config)),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: Arc<RuntimeConfig>) {
    match effect {
        Effect::FetchForecast { request } => {
            let endpoint = config.endpoint.clone();
            ctx.tasks().spawn("forecast", async move {
                match api::fetch_forecast(&endpoint, &request).await {
                    Ok(forecast) => Action::ForecastDidLoad(forecast),
                    Err(err) => Action::ForecastDidError(err.to_string()),
                }
            });
        }
    }
}
