use super::{App, AppAction, AppCommand};

pub(super) fn handle_connectivity_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::StartProbe => {
            if app.connectivity.begin_probe() {
                Some(AppCommand::ProbeBackend(app.probe_params()))
            } else {
                None
            }
        }
        AppAction::ProbeCompleted { result } => {
            app.connectivity.record_probe(result);
            None
        }
        _ => unreachable!("non-connectivity action routed to connectivity handler"),
    }
}
