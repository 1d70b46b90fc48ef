use tracing::info;

use super::{App, AppAction, AppCommand};

/// Preference changes. None of these emit side effects; the next request
/// simply reads whatever is current.
pub(super) fn handle_settings_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SetInput { text } => {
            app.input = text;
        }
        AppAction::SetModel { model } => {
            app.session.set_model(model);
            info!(%model, "Model selected");
        }
        AppAction::SetCredential { credential } => {
            app.session.set_credential(credential);
            info!(present = app.session.has_credential(), "Credential updated");
        }
        AppAction::SetReasoning { enabled } => {
            app.session.set_reasoning(enabled);
            info!(enabled, "Reasoning toggle set");
        }
        AppAction::ToggleReasoning => {
            let enabled = app.session.toggle_reasoning();
            info!(enabled, "Reasoning toggle set");
        }
        AppAction::SetTheme { theme } => {
            app.session.set_theme(theme);
            info!(theme = theme.as_str(), "Theme changed");
        }
        AppAction::ToggleTheme => {
            let theme = app.session.toggle_theme();
            info!(theme = theme.as_str(), "Theme changed");
        }
        _ => unreachable!("non-settings action routed to settings handler"),
    }
    None
}
