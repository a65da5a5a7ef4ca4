//! Settings persistence: two versioned bitcode blobs written atomically,
//! loaded before anything reads them, rewritten whenever they change.

use bevy::prelude::*;

use simulation::settings::{EffectSettings, PerfSettings};

mod atomic_write;
mod settings_error;
mod settings_store;

pub use atomic_write::atomic_write;
pub use settings_error::SettingsError;
pub use settings_store::{
    decode_blob, encode_blob, load_or_default, store, SettingsPaths, SETTINGS_VERSION,
};

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsPaths>();

        // PreStartup so other plugins' Startup systems already see the
        // persisted values.
        app.add_systems(PreStartup, load_settings);

        app.add_systems(
            Update,
            (
                persist_effect_settings.run_if(resource_changed::<EffectSettings>),
                persist_perf_settings.run_if(resource_changed::<PerfSettings>),
            ),
        );
    }
}

/// Replaces both settings resources with their persisted values (or the
/// defaults when nothing usable is on disk).
fn load_settings(
    paths: Res<SettingsPaths>,
    mut effects: ResMut<EffectSettings>,
    mut perf: ResMut<PerfSettings>,
) {
    *effects = load_or_default(&paths.effects);
    *perf = load_or_default(&paths.perf);
    info!(
        "loaded settings: quality {}, auto-adjust {}",
        perf.quality_level.label(),
        perf.auto_adjust
    );
}

/// Rewrites the effects blob after any change. Write failures are logged
/// and absorbed; the running game keeps its in-memory settings.
fn persist_effect_settings(paths: Res<SettingsPaths>, settings: Res<EffectSettings>) {
    if let Err(e) = store(&paths.effects, &*settings) {
        warn!("failed to persist effect settings: {e}");
    }
}

fn persist_perf_settings(paths: Res<SettingsPaths>, settings: Res<PerfSettings>) {
    if let Err(e) = store(&paths.perf, &*settings) {
        warn!("failed to persist performance settings: {e}");
    }
}
