use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Props arrive as struct fields, local state lives behind `&mut` fields,
/// and output goes to a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so a component can refresh caches (layout,
/// scroll offsets) during the render pass, as with ratatui's
/// `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    /// The high-level event this component emits to its owner.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
