//! Immediate-Mode Widgets
//!
//! Widgets are plain data owned by the game. Pointer handlers mutate the
//! widgets they hit and report what happened as [`UiEvent`]s, which the game
//! matches on by widget id.
//!
//! ```text
//! pointer ──► handle_click / handle_drag ──► Vec<UiEvent>
//!                     │
//!                     ▼
//!               &mut [Widget] ──► draw(surface)
//! ```

use serde::{Serialize, Deserialize};

use crate::core::math::clamp;
use crate::host::Surface;

const PANEL: &str = "rgba(0,0,0,0.5)";
const PANEL_HOVER: &str = "rgba(255,255,255,0.2)";
const ACCENT: &str = "#7df9ff";
const INK: &str = "#fff";

/// Default slider height.
pub const SLIDER_HEIGHT: f32 = 24.0;

/// Checkbox side.
pub const CHECKBOX_SIZE: f32 = 18.0;

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left
    pub x: f32,
    /// Top
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Rectangle from origin and size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Containment with all four edges included.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// Widget variant and its state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WidgetKind {
    /// Push button
    Button {
        /// Caption
        text: String,
        /// Pointer over the button
        hover: bool,
    },
    /// Horizontal value slider
    Slider {
        /// Caption
        label: String,
        /// Value at the left edge
        min: f32,
        /// Value at the right edge
        max: f32,
        /// Current value
        value: f32,
    },
    /// Toggle box
    Checkbox {
        /// Caption
        label: String,
        /// Checked
        value: bool,
    },
}

/// One widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Caller-chosen id reported in events
    pub id: String,
    /// Hit and draw area
    pub rect: Rect,
    /// Variant state
    pub kind: WidgetKind,
}

/// What a pointer action did.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A button was clicked.
    Clicked {
        /// Widget id
        id: String,
    },
    /// A checkbox flipped.
    Toggled {
        /// Widget id
        id: String,
        /// New state
        value: bool,
    },
    /// A slider moved.
    Changed {
        /// Widget id
        id: String,
        /// New value
        value: f32,
    },
}

impl Widget {
    /// Button with the given bounds.
    pub fn button(id: impl Into<String>, text: impl Into<String>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id: id.into(),
            rect: Rect::new(x, y, w, h),
            kind: WidgetKind::Button {
                text: text.into(),
                hover: false,
            },
        }
    }

    /// Slider of width `w` and the default height.
    #[allow(clippy::too_many_arguments)]
    pub fn slider(
        id: impl Into<String>,
        label: impl Into<String>,
        x: f32,
        y: f32,
        w: f32,
        min: f32,
        max: f32,
        value: f32,
    ) -> Self {
        Self {
            id: id.into(),
            rect: Rect::new(x, y, w, SLIDER_HEIGHT),
            kind: WidgetKind::Slider {
                label: label.into(),
                min,
                max,
                value,
            },
        }
    }

    /// Fixed-size checkbox.
    pub fn checkbox(id: impl Into<String>, label: impl Into<String>, x: f32, y: f32, value: bool) -> Self {
        Self {
            id: id.into(),
            rect: Rect::new(x, y, CHECKBOX_SIZE, CHECKBOX_SIZE),
            kind: WidgetKind::Checkbox {
                label: label.into(),
                value,
            },
        }
    }
}

/// True if (x, y) is on the widget, edges included.
pub fn hit(widget: &Widget, x: f32, y: f32) -> bool {
    widget.rect.contains(x, y)
}

/// Click every widget under the pointer. Buttons report a click,
/// checkboxes flip and report the new state; sliders ignore clicks.
pub fn handle_click(widgets: &mut [Widget], x: f32, y: f32) -> Vec<UiEvent> {
    let mut events = Vec::new();
    for widget in widgets.iter_mut().filter(|w| hit(w, x, y)) {
        match &mut widget.kind {
            WidgetKind::Button { .. } => events.push(UiEvent::Clicked { id: widget.id.clone() }),
            WidgetKind::Checkbox { value, .. } => {
                *value = !*value;
                events.push(UiEvent::Toggled {
                    id: widget.id.clone(),
                    value: *value,
                });
            }
            WidgetKind::Slider { .. } => {}
        }
    }
    events
}

/// Drag every slider under the pointer to the pointer's x position.
pub fn handle_drag(widgets: &mut [Widget], x: f32, y: f32) -> Vec<UiEvent> {
    let mut events = Vec::new();
    for widget in widgets.iter_mut().filter(|w| hit(w, x, y)) {
        let rect = widget.rect;
        if let WidgetKind::Slider { min, max, value, .. } = &mut widget.kind {
            let t = if rect.w > 0.0 { clamp((x - rect.x) / rect.w, 0.0, 1.0) } else { 0.0 };
            *value = *min + (*max - *min) * t;
            events.push(UiEvent::Changed {
                id: widget.id.clone(),
                value: *value,
            });
        }
    }
    events
}

/// Set button hover flags from the pointer position.
pub fn update_hover(widgets: &mut [Widget], x: f32, y: f32) {
    for widget in widgets.iter_mut() {
        let over = hit(widget, x, y);
        if let WidgetKind::Button { hover, .. } = &mut widget.kind {
            *hover = over;
        }
    }
}

/// Draw widgets in order.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, widgets: &[Widget]) {
    for widget in widgets {
        let Rect { x, y, w, h } = widget.rect;
        match &widget.kind {
            WidgetKind::Button { text, hover } => {
                surface.set_fill(if *hover { PANEL_HOVER } else { PANEL });
                surface.fill_rect(x, y, w, h);
                surface.set_fill(INK);
                surface.fill_text(text, x + 8.0, y + h / 2.0 + 4.0);
            }
            WidgetKind::Slider { label, min, max, value } => {
                surface.set_fill(PANEL);
                surface.fill_rect(x, y, w, h);
                let span = max - min;
                let t = if span != 0.0 { (value - min) / span } else { 0.0 };
                surface.set_fill(ACCENT);
                surface.fill_rect(x, y, w * t, h);
                surface.set_fill(INK);
                surface.fill_text(&format!("{label}: {value:.1}"), x + 4.0, y - 4.0);
            }
            WidgetKind::Checkbox { label, value } => {
                surface.set_stroke(INK);
                surface.stroke_rect(x, y, w, h);
                if *value {
                    surface.set_fill(ACCENT);
                    surface.fill_rect(x + 3.0, y + 3.0, w - 6.0, h - 6.0);
                }
                surface.set_fill(INK);
                surface.fill_text(label, x + w + 6.0, y + h - 2.0);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DrawCommand, RecordingSurface};

    fn panel() -> Vec<Widget> {
        vec![
            Widget::button("start", "Start", 10.0, 10.0, 100.0, 30.0),
            Widget::slider("volume", "Volume", 10.0, 60.0, 100.0, 0.0, 10.0, 5.0),
            Widget::checkbox("mute", "Mute", 10.0, 100.0, false),
        ]
    }

    #[test]
    fn test_default_sizes() {
        let w = panel();
        assert_eq!(w[1].rect.h, 24.0);
        assert_eq!((w[2].rect.w, w[2].rect.h), (18.0, 18.0));
    }

    #[test]
    fn test_hit_inclusive_edges() {
        let w = &panel()[0];
        assert!(hit(w, 10.0, 10.0));
        assert!(hit(w, 110.0, 40.0));
        assert!(!hit(w, 110.1, 40.0));
        assert!(!hit(w, 9.9, 20.0));
    }

    #[test]
    fn test_click_button_and_checkbox() {
        let mut widgets = panel();
        assert_eq!(
            handle_click(&mut widgets, 50.0, 20.0),
            vec![UiEvent::Clicked { id: "start".into() }]
        );
        assert_eq!(
            handle_click(&mut widgets, 19.0, 109.0),
            vec![UiEvent::Toggled { id: "mute".into(), value: true }]
        );
        assert_eq!(
            handle_click(&mut widgets, 19.0, 109.0),
            vec![UiEvent::Toggled { id: "mute".into(), value: false }]
        );
        // Sliders ignore clicks; empty space hits nothing.
        assert!(handle_click(&mut widgets, 50.0, 70.0).is_empty());
        assert!(handle_click(&mut widgets, 500.0, 500.0).is_empty());
    }

    #[test]
    fn test_drag_slider() {
        let mut widgets = panel();
        let events = handle_drag(&mut widgets, 35.0, 70.0);
        assert_eq!(events, vec![UiEvent::Changed { id: "volume".into(), value: 2.5 }]);
        assert!(matches!(widgets[1].kind, WidgetKind::Slider { value, .. } if value == 2.5));

        // Drags off the slider do nothing, even along its row.
        assert!(handle_drag(&mut widgets, 200.0, 70.0).is_empty());
        handle_drag(&mut widgets, 110.0, 84.0);
        assert!(matches!(widgets[1].kind, WidgetKind::Slider { value, .. } if value == 10.0));
    }

    #[test]
    fn test_hover_only_buttons() {
        let mut widgets = panel();
        update_hover(&mut widgets, 20.0, 20.0);
        assert!(matches!(widgets[0].kind, WidgetKind::Button { hover: true, .. }));
        update_hover(&mut widgets, 0.0, 0.0);
        assert!(matches!(widgets[0].kind, WidgetKind::Button { hover: false, .. }));
    }

    #[test]
    fn test_draw_commands() {
        let mut widgets = panel();
        handle_click(&mut widgets, 19.0, 109.0);
        let mut surface = RecordingSurface::new();
        draw(&mut surface, &widgets);

        assert!(surface.commands.contains(&DrawCommand::Text("Start".into(), 18.0, 29.0)));
        assert!(surface.commands.contains(&DrawCommand::FillRect(10.0, 60.0, 50.0, 24.0)));
        assert!(surface.commands.contains(&DrawCommand::Text("Volume: 5.0".into(), 14.0, 56.0)));
        assert!(surface.commands.contains(&DrawCommand::StrokeRect(10.0, 100.0, 18.0, 18.0)));
        assert!(surface.commands.contains(&DrawCommand::FillRect(13.0, 103.0, 12.0, 12.0)));
        assert!(surface.commands.contains(&DrawCommand::Text("Mute".into(), 34.0, 116.0)));
    }

    #[test]
    fn test_widget_json() {
        let w: Widget = serde_json::from_str(
            r#"{"id": "ok", "rect": {"x": 0, "y": 0, "w": 10, "h": 10},
                "kind": {"type": "checkbox", "label": "On", "value": true}}"#,
        )
        .unwrap();
        assert_eq!(w.kind, WidgetKind::Checkbox { label: "On".into(), value: true });
    }
}
