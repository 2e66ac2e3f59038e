use crate::domain::RosterEvent;

/// Port for views that need to hear about roster changes
///
/// Listeners are called synchronously, in registration order, after the
/// mutation has been committed.
pub trait ChangeListener {
    fn notify(&self, event: &RosterEvent);
}

/// Any `Fn(&RosterEvent)` closure can be registered directly
impl<F> ChangeListener for F
where
    F: Fn(&RosterEvent),
{
    fn notify(&self, event: &RosterEvent) {
        self(event)
    }
}
