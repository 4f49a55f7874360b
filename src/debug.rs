/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and flock statistics to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time and simulation step time
 * - Number of simulation steps run per frame
 * - Neighborhood statistics of the last step
 */

use std::time::Duration;

use crate::simulation::StepStats;

// Weight of the newest frame in the smoothed FPS value
const FPS_SMOOTHING: f32 = 0.1;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub physics_updates_per_frame: usize,
    pub drawn_boids: usize,
    pub stats: StepStats,
}

impl DebugInfo {
    pub fn record_frame(&mut self, frame_time: Duration) {
        self.frame_time = frame_time;
        let seconds = frame_time.as_secs_f32();
        if seconds > 0.0 {
            let instant_fps = 1.0 / seconds;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps + (instant_fps - self.fps) * FPS_SMOOTHING
            };
        }
    }
}
