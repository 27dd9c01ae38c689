use feed::{Direction, DirectionID, Route, RouteID};

use crate::interactions::MapEvent;

/// The two pickers next to the map. Implementations only draw; choices come back as
/// [`UiEvent`]s.
pub trait SelectionUi {
    /// Follows an empty "no route" choice
    fn set_route_options(&self, routes: &[Route]);
    /// Back to just the placeholder, disabled
    fn reset_directions(&self);
    /// Follows the placeholder
    fn set_direction_options(&self, directions: &[Direction]);
    fn set_directions_enabled(&self, enabled: bool);
    fn select_direction(&self, direction: &DirectionID);
}

#[derive(Clone, Debug)]
pub enum UiEvent {
    /// None is the empty choice
    RouteChanged(Option<RouteID>),
    /// None is the placeholder
    DirectionChanged(Option<DirectionID>),
    Map(MapEvent),
}
