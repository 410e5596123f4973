//! # TestNetwork: headless harness for the signal coordination plugin
//!
//! Wraps a `MinimalPlugins` Bevy `App` with [`SignalCoordinationPlugin`] so
//! tests can build a road network, feed measurements and request decisions
//! through the same systems the binary uses.

mod queries;
mod setup;

use std::sync::Arc;

use bevy::app::App;
use bevy::prelude::*;

use crate::change_log::{CoordinationObserver, ObserverHandle};
use crate::params::SignalParams;
use crate::SignalCoordinationPlugin;

/// A headless Bevy App wrapping `SignalCoordinationPlugin`.
///
/// Use builder methods to set up the network, then `decide()` or `tick()` and
/// assert on the resulting resources.
pub struct TestNetwork {
    app: App,
}

impl TestNetwork {
    /// Empty network with default params and the default change-log observer.
    pub fn new() -> Self {
        Self::build(SignalParams::default(), None)
    }

    /// Empty network with custom params.
    pub fn with_params(params: SignalParams) -> Self {
        Self::build(params, None)
    }

    /// Empty network reporting to `observer` instead of the change log.
    pub fn with_observer(observer: Arc<dyn CoordinationObserver>) -> Self {
        Self::build(SignalParams::default(), Some(observer))
    }

    fn build(params: SignalParams, observer: Option<Arc<dyn CoordinationObserver>>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Inserted before the plugin so its init_resource calls keep them.
        app.insert_resource(params);
        if let Some(observer) = observer {
            app.insert_resource(ObserverHandle(observer));
        }
        app.add_plugins(SignalCoordinationPlugin);

        app.update();
        Self { app }
    }
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self::new()
    }
}
