//! Render snapshot tests using RenderHarness
//!
//! FRAMEWORK PATTERN: RenderHarness
//! - Create harness with terminal dimensions
//! - Render component to test buffer
//! - Convert to string for snapshot testing

use tui_dispatch::{DataResource, testing::*};

use fishcast::{
    components::{
        Component, ForecastOverlay, ForecastOverlayProps, FormPanel, FormPanelProps,
        PickerOverlay, PickerOverlayProps,
    },
    payload,
    registry::Elements,
    state::{Forecast, FormState, OverlayPhase, PickerState},
};

fn elements() -> Elements {
    Elements::resolve().expect("complete element table")
}

fn mock_forecast() -> Forecast {
    // The worked example from the service contract.
    payload::parse_forecast(
        r#"{"weather":{"condition":"Sunny","temp":"85F","wind":"5mph"},
            "tides":{"high":"2:00PM","low":"8:00AM"},
            "waves":"1-2ft",
            "forecastText":"**Summary**\nGood day."}"#,
    )
    .expect("mock forecast parses")
}

#[test]
fn test_render_form_labels_and_submit() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = FormPanel::new();
    let elements = elements();
    let form = FormState::default();

    let output = render.render_to_string_plain(|frame| {
        let props = FormPanelProps {
            form: &form,
            submitting: false,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Location"), "Should show location label");
    assert!(output.contains("Date"), "Should show date label");
    assert!(output.contains("Comments"), "Should show comments label");
    assert!(
        output.contains("Cast Forecast"),
        "Submit control shows its default label"
    );
}

#[test]
fn test_render_form_busy_submit_control() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = FormPanel::new();
    let elements = elements();
    let form = FormState::default();

    let output = render.render_to_string_plain(|frame| {
        let props = FormPanelProps {
            form: &form,
            submitting: true,
            spinner_frame: 3,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("Consulting the tides"),
        "Busy label replaces the default while loading"
    );
    assert!(
        !output.contains("Cast Forecast"),
        "Default label is gone while loading"
    );
}

#[test]
fn test_render_form_help_bar() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = FormPanel::new();
    let elements = elements();
    let form = FormState::default();

    let output = render.render_to_string_plain(|frame| {
        let props = FormPanelProps {
            form: &form,
            submitting: false,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("next field"), "Should show tab hint");
    assert!(output.contains("chart"), "Should show picker hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_overlay_spinner_while_loading() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = ForecastOverlay::new();
    let elements = elements();
    let forecast = DataResource::Loading;

    let output = render.render_to_string_plain(|frame| {
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Visible,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("Reading the water"),
        "Spinner caption visible while loading"
    );
    assert!(
        !output.contains("Good day"),
        "No content while the spinner shows"
    );
}

#[test]
fn test_render_overlay_worked_example() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = ForecastOverlay::new();
    let elements = elements();
    let forecast = DataResource::Loaded(mock_forecast());

    let output = render.render_to_string_plain(|frame| {
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Visible,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    // Grid values arrive verbatim.
    assert!(output.contains("Sunny"), "Condition cell shows Sunny");
    assert!(output.contains("85F"), "Temp cell shows 85F");
    assert!(output.contains("5mph"), "Wind cell shows 5mph");
    assert!(output.contains("2:00PM"), "Tide cell shows the high");
    assert!(output.contains("1-2ft"), "Waves cell shows the height");

    // Narrative: heading once, first body line intact.
    assert!(output.contains("Summary"), "Narrative heading renders");
    assert!(output.contains("Good day."), "First body line renders");
    assert_eq!(
        output.matches("Summary").count(),
        1,
        "Heading appears exactly once"
    );
    assert!(
        !output.contains("Reading the water"),
        "Spinner hidden once content shows"
    );
}

#[test]
fn test_render_overlay_error_panel() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = ForecastOverlay::new();
    let elements = elements();
    let err = payload::failure_for_status(503, "<html>oops</html>");
    let forecast = DataResource::Failed(err.to_string());

    let output = render.render_to_string_plain(|frame| {
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Visible,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Error"), "Should show error label");
    assert!(output.contains("503"), "Message embeds the status code");
    assert!(
        !output.contains("Reading the water"),
        "Spinner hidden on the error path too"
    );
}

#[test]
fn test_render_overlay_hidden_paints_nothing() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = ForecastOverlay::new();
    let elements = elements();
    let forecast = DataResource::Loaded(mock_forecast());

    let output = render.render_to_string_plain(|frame| {
        let props = ForecastOverlayProps {
            forecast: &forecast,
            phase: OverlayPhase::Hidden,
            scroll: 0,
            spinner_frame: 0,
            elements: &elements,
            is_focused: false,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        !output.contains("Sunny"),
        "A hidden overlay is remasked and paints nothing"
    );
}

#[test]
fn test_render_picker_chart_and_readout() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = PickerOverlay::new();
    let elements = elements();
    let picker = PickerState {
        phase: OverlayPhase::Visible,
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = PickerOverlayProps {
            picker: &picker,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Pick a Spot"), "Picker title renders");
    // Cursor sits at the chart center; the readout shows that cell's
    // coordinate at fixed precision.
    let expected = picker
        .view()
        .cell_to_geo(picker.cursor.0, picker.cursor.1)
        .expect("cursor starts inside the chart")
        .format_fixed(4);
    assert!(
        output.contains(&expected),
        "Readout shows {expected}:\n{output}"
    );
    assert!(output.contains("drop marker"), "Hint line renders");
}

#[test]
fn test_render_picker_linger_notice() {
    let mut render = RenderHarness::new(80, 28);
    let mut component = PickerOverlay::new();
    let elements = elements();
    let picker = PickerState {
        phase: OverlayPhase::Visible,
        marker: Some((28.0, -90.0)),
        linger_ticks: 5,
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = PickerOverlayProps {
            picker: &picker,
            elements: &elements,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("Marker dropped"),
        "Linger notice shows after a pick"
    );
}
