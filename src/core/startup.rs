use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::state::AppState;

/// Load the credential file once at boot so a corrupt file stops startup
/// instead of failing every login.
pub fn check_user_data(state: &AppState) -> Result<usize> {
    let path = state.credentials.path();

    if !path.exists() {
        warn!(
            path = %path.display(),
            "User data file does not exist yet, it will be created on first registration"
        );
        return Ok(0);
    }

    let users = state
        .credentials
        .load()
        .context(format!("Failed to load user data from '{}'", path.display()))?;

    info!(
        path = %path.display(),
        users = users.len(),
        "User data loaded"
    );

    Ok(users.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::launcher::DisabledLauncher;
    use crate::core::config::Config;
    use crate::testing::{FakeClassifier, FakeFrameSource};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn state_for(temp_dir: &TempDir) -> AppState {
        let mut config = Config::default();
        config.storage.user_data_file = temp_dir.path().join("user_data.txt");

        AppState::with_collaborators(
            config,
            Arc::new(FakeFrameSource::ok()),
            Arc::new(FakeClassifier::returning("happy")),
            Arc::new(DisabledLauncher),
        )
    }

    #[test]
    fn test_missing_file_is_zero_users() {
        let temp_dir = TempDir::new().unwrap();
        let state = state_for(&temp_dir);

        assert_eq!(check_user_data(&state).unwrap(), 0);
    }

    #[test]
    fn test_counts_users() {
        let temp_dir = TempDir::new().unwrap();
        let state = state_for(&temp_dir);
        std::fs::write(
            state.credentials.path(),
            "alice,pw,English,Adele\nravi,pw,Hindi,Arijit\n",
        )
        .unwrap();

        assert_eq!(check_user_data(&state).unwrap(), 2);
    }

    #[test]
    fn test_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let state = state_for(&temp_dir);
        std::fs::write(state.credentials.path(), "alice,pw\n").unwrap();

        assert!(check_user_data(&state).is_err());
    }
}
