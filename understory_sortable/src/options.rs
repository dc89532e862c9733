// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration and callbacks.

use alloc::boxed::Box;

use understory_element_tree::NodeId;

use crate::types::InputMode;

/// Plain-data configuration for a [`Sortable`](crate::Sortable).
///
/// With the `serde` feature this can be loaded from a settings file; missing
/// fields take their defaults.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SortableConfig {
    /// Swap the dragged child with the drop target instead of reordering live while hovering.
    pub warp: bool,
    /// Input path, usually from [`InputMode::detect`].
    pub input: InputMode,
}

/// Callback receiving `(target, dragged)` after a committed drop.
pub type ChangeFn = Box<dyn FnMut(NodeId, NodeId)>;
/// Session lifecycle callback.
pub type LifecycleFn = Box<dyn FnMut()>;

/// Configuration plus callbacks.
///
/// ```
/// use understory_sortable::{InputMode, SortableOptions};
///
/// let opts = SortableOptions::new()
///     .warp(true)
///     .input(InputMode::Synthetic)
///     .with_change(|target, dragged| {
///         let _ = (target, dragged);
///     });
/// assert!(opts.config.warp);
/// ```
#[derive(Default)]
pub struct SortableOptions {
    /// Plain-data settings.
    pub config: SortableConfig,
    /// Called once per committed drop with `(target, dragged)`, after the tree is updated.
    ///
    /// With live reordering the dragged child usually ends up under the
    /// pointer, so the drop lands on the dragged child itself and this is not
    /// called. The reordered tree is already final by then; hosts that must
    /// see every reorder should also read the order in `on_stop`.
    pub on_change: Option<ChangeFn>,
    /// Called when a session starts.
    pub on_start: Option<LifecycleFn>,
    /// Called when a session ends, whether by drag end or focus loss.
    pub on_stop: Option<LifecycleFn>,
}

impl core::fmt::Debug for SortableOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SortableOptions")
            .field("config", &self.config)
            .field("on_change", &self.on_change.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

impl SortableOptions {
    /// Default options: live reordering, native input, no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options built from a plain configuration.
    pub fn from_config(config: SortableConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Select swap-on-drop (`true`) or live reordering (`false`).
    #[must_use]
    pub fn warp(mut self, warp: bool) -> Self {
        self.config.warp = warp;
        self
    }

    /// Select the input path.
    #[must_use]
    pub fn input(mut self, input: InputMode) -> Self {
        self.config.input = input;
        self
    }

    /// Set the drop callback.
    #[must_use]
    pub fn with_change(mut self, f: impl FnMut(NodeId, NodeId) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Set the session start callback.
    #[must_use]
    pub fn with_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Set the session end callback.
    #[must_use]
    pub fn with_stop(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_stop = Some(Box::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_config() {
        let opts = SortableOptions::new()
            .warp(true)
            .input(InputMode::Synthetic)
            .with_stop(|| {});
        assert_eq!(
            opts.config,
            SortableConfig {
                warp: true,
                input: InputMode::Synthetic
            }
        );
        assert!(opts.on_stop.is_some());
        assert!(opts.on_change.is_none());
    }

    #[test]
    fn debug_hides_closures() {
        let opts = SortableOptions::new().with_change(|_, _| {});
        let s = alloc::format!("{opts:?}");
        assert!(s.contains("on_change: true"), "{s}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: SortableConfig = serde_json::from_str(r#"{"input":"synthetic"}"#).unwrap();
        assert_eq!(
            cfg,
            SortableConfig {
                warp: false,
                input: InputMode::Synthetic
            }
        );
        let json = serde_json::to_string(&SortableConfig::default()).unwrap();
        assert_eq!(json, r#"{"warp":false,"input":"native"}"#);
    }
}
