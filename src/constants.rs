pub const WINDOW_WIDTH: i32 = 1280;            // Default window width
pub const WINDOW_HEIGHT: i32 = 720;            // Default window height
pub const FPS: u32 = 60;                       // Frames per second
pub const TICK_RATE: f32 = 60.0;               // Reference rate for per-tick friction

// Carousel
pub const SLIDE_INTERVAL: f32 = 3.0;           // Idle time before auto-advance (seconds)
pub const TRANSITION_DURATION: f32 = 0.8;      // Slide transition length (seconds)
pub const COUNTER_DELAY: f32 = 0.25;           // Counter starts this late into a transition
pub const COUNTER_DURATION: f32 = 0.4;
pub const HEADING_REST_WIDTH: f32 = 200.0;
pub const HEADING_WIDE_WIDTH: f32 = 800.0;

// Gestures
pub const GESTURE_TOLERANCE: f32 = 10.0;       // Pixels of travel before a gesture fires
pub const WHEEL_NOTCH: f32 = 100.0;            // Pixels of scroll per wheel notch

// Confetti
pub const CONFETTI_SPAWN_INTERVAL: f32 = 0.025;
pub const CONFETTI_START_Y: f32 = -20.0;
pub const CONFETTI_CAPACITY: usize = 512;      // Steady state is ~190 at 25ms spawns
pub const BURST_CAPACITY: usize = 1024;

// Balloons
pub const BALLOON_BASE_COUNT: usize = 15;
pub const BALLOON_SPAWN_INTERVAL: f32 = 2.0;
pub const BALLOON_CAP_FACTOR: f32 = 1.5;
pub const BALLOON_SHARDS: usize = 20;

// Audio
pub const ICON_MORPH_DURATION: f32 = 0.5;

// Chase
pub const WANDER_BUFFER: f32 = 20.0;
pub const WANDER_FRICTION: f32 = 0.1;         // Velocity lost per 60Hz tick
pub const ARRIVAL_RADIUS: f32 = 8.0;
pub const PURSUIT_JITTER: f32 = 10.0;
pub const PURSUIT_RETARGET: f32 = 0.1;
pub const PURSUIT_TIME_CONSTANT: f32 = 0.3;
pub const SNAP_TIME_CONSTANT: f32 = 0.1;        // Pursuit while the leader is dragged
pub const THROW_MIN_SPEED: f32 = 60.0;
pub const THROW_STOP_SPEED: f32 = 20.0;
pub const THROW_DECAY: f32 = 3.0;              // Exponential decay rate of thrown velocity (1/s)
pub const MASCOT_SIZE: f32 = 96.0;

// Gallery
pub const GALLERY_MAX_ITEMS: usize = 6;
pub const GALLERY_KICK: f32 = 30.0;
pub const GALLERY_TIME_SCALE: f32 = 1.2;
