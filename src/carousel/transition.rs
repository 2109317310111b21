use raylib::prelude::*;

use crate::constants::*;
use crate::input::Direction;
use crate::timeline::Track;

/// Which optional parts a slide has. Absent parts get no tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideParts {
    pub heading: bool,
    pub overlay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingPose {
    pub width: f32,
    pub x_percent: f32,
}

impl HeadingPose {
    pub const REST: HeadingPose = HeadingPose { width: HEADING_REST_WIDTH, x_percent: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPose {
    pub x_percent: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
}

impl OverlayPose {
    pub const REST: OverlayPose = OverlayPose { x_percent: 0.0, scale_x: 1.0, scale_y: 1.0, alpha: 1.0 };
}

/// Where the incoming slide's layers are at a given moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingPose {
    pub outer_x_percent: f32,
    pub inner_x_percent: f32,
    pub image_scale: f32,
    pub heading: Option<HeadingPose>,
    pub overlay: Option<OverlayPose>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutgoingPose {
    pub heading: Option<HeadingPose>,
    pub overlay: Option<OverlayPose>,
}

#[derive(Debug, Clone, Copy)]
struct HeadingTracks {
    width: Track,
    x: Track,
}

impl HeadingTracks {
    fn sample(&self, t: f32) -> HeadingPose {
        HeadingPose { width: self.width.sample(t), x_percent: self.x.sample(t) }
    }
}

#[derive(Debug, Clone, Copy)]
struct OverlayTracks {
    x: Track,
    scale_x: Track,
    scale_y: Track,
    alpha: Track,
}

impl OverlayTracks {
    fn sample(&self, t: f32) -> OverlayPose {
        OverlayPose {
            x_percent: self.x.sample(t),
            scale_x: self.scale_x.sample(t),
            scale_y: self.scale_y.sample(t),
            alpha: self.alpha.sample(t),
        }
    }
}

/// The coordinated timeline that moves from one slide to another.
#[derive(Debug, Clone)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    elapsed: f32,
    duration: f32,

    counter: Track,
    outer: Track,
    inner: Track,
    image_scale: Track,
    outgoing_heading: Option<HeadingTracks>,
    incoming_heading: Option<HeadingTracks>,
    outgoing_overlay: Option<OverlayTracks>,
    incoming_overlay: Option<OverlayTracks>,
}

impl Transition {
    pub fn new(from: usize, to: usize, direction: Direction, from_parts: SlideParts, to_parts: SlideParts) -> Self {
        let dir = direction.sign();
        let d = TRANSITION_DURATION;
        let track = |a: f32, b: f32| Track::new(a, b, d, ease::expo_in_out);

        let counter = Track::new((from + 1) as f32, (to + 1) as f32, COUNTER_DURATION, ease::quad_out)
            .delayed(COUNTER_DELAY);

        let outgoing_heading = from_parts.heading.then(|| HeadingTracks {
            width: track(HEADING_REST_WIDTH, HEADING_WIDE_WIDTH),
            x: track(0.0, 30.0 * dir),
        });
        let incoming_heading = to_parts.heading.then(|| HeadingTracks {
            width: track(HEADING_WIDE_WIDTH, HEADING_REST_WIDTH),
            x: track(-30.0 * dir, 0.0),
        });
        let incoming_overlay = to_parts.overlay.then(|| OverlayTracks {
            x: track(125.0 * dir, 0.0),
            scale_x: track(1.5, 1.0),
            scale_y: track(1.3, 1.0),
            alpha: track(0.0, 1.0),
        });
        let outgoing_overlay = from_parts.overlay.then(|| OverlayTracks {
            x: track(0.0, -125.0 * dir),
            scale_x: track(1.0, 1.5),
            scale_y: track(1.0, 1.3),
            alpha: track(1.0, 0.0),
        });

        let duration = d.max(counter.end_time());

        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
            counter,
            outer: track(100.0 * dir, 0.0),
            inner: track(-100.0 * dir, 0.0),
            image_scale: track(2.0, 1.0),
            outgoing_heading,
            incoming_heading,
            outgoing_overlay,
            incoming_overlay,
        }
    }

    /// Advance the clock. Returns `true` once the timeline has completed.
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The 1-based number the slide counter shows, snapped to integers.
    pub fn counter(&self) -> u32 {
        self.counter.sample(self.elapsed).round().max(1.0) as u32
    }

    pub fn incoming(&self) -> IncomingPose {
        let t = self.elapsed;
        IncomingPose {
            outer_x_percent: self.outer.sample(t),
            inner_x_percent: self.inner.sample(t),
            image_scale: self.image_scale.sample(t),
            heading: self.incoming_heading.map(|h| h.sample(t)),
            overlay: self.incoming_overlay.map(|o| o.sample(t)),
        }
    }

    pub fn outgoing(&self) -> OutgoingPose {
        let t = self.elapsed;
        OutgoingPose {
            heading: self.outgoing_heading.map(|h| h.sample(t)),
            overlay: self.outgoing_overlay.map(|o| o.sample(t)),
        }
    }
}
