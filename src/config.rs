//! Engine tuning knobs. Hosts construct one [`EngineConfig`] and thread it
//! through [`crate::machine::DragEngine::new`]; nothing here is global.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Fraction of the container size from an edge at which scrolling starts.
    pub start_from_percentage: f64,
    /// Fraction of the container size from an edge at which the scroll
    /// reaches `max_pixel_scroll`.
    pub max_scroll_at_percentage: f64,
    /// Largest scroll applied in a single frame, in pixels.
    pub max_pixel_scroll: f64,
    /// Exponent of the ease applied between the two thresholds.
    pub ease_exponent: f64,
    /// No scrolling before this much drag time has elapsed, in milliseconds.
    pub accelerate_at_ms: u64,
    /// Dampening is fully released after this much drag time, in milliseconds.
    pub stop_dampening_at_ms: u64,
    pub disabled: bool,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        AutoScrollConfig {
            start_from_percentage: 0.25,
            max_scroll_at_percentage: 0.05,
            max_pixel_scroll: 28.0,
            ease_exponent: 2.0,
            accelerate_at_ms: 360,
            stop_dampening_at_ms: 1200,
            disabled: false,
        }
    }
}

impl AutoScrollConfig {
    pub fn ease(&self, percentage: f64) -> f64 {
        percentage.powf(self.ease_exponent)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropAnimationConfig {
    /// Duration of a drop over zero distance, in seconds.
    pub min_duration: f64,
    /// Duration cap reached at `max_distance`, in seconds.
    pub max_duration: f64,
    /// Distance, in pixels, at which `max_duration` applies.
    pub max_distance: f64,
    /// Cancelled drops animate faster by this factor.
    pub cancel_factor: f64,
}

impl Default for DropAnimationConfig {
    fn default() -> Self {
        DropAnimationConfig {
            min_duration: 0.33,
            max_duration: 0.55,
            max_distance: 1500.0,
            cancel_factor: 0.6,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub auto_scroll: AutoScrollConfig,
    pub drop_animation: DropAnimationConfig,
}
