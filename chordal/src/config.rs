use embassy_time::Duration;

/// Config for configurable action behavior
#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorConfig {
    pub tap_hold: TapHoldConfig,
    pub repeat: RepeatConfig,
}

/// Configurations for tap hold behavior
#[derive(Clone, Copy, Debug)]
pub struct TapHoldConfig {
    /// How long a tap-hold key waits for a release or an interrupting key before it becomes a hold
    pub timeout: Duration,
    /// Pressing the same tap-hold key again within this window after it was tapped skips the decision
    pub quick_tap_term: Duration,
    /// A tap-hold key pressed within this window after a typing key resolves to tap immediately
    pub streak_timeout: Duration,
    /// Streak window for tap-hold keys whose hold is shift, kept short so capitals still work mid-word
    pub shift_streak_timeout: Duration,
}

impl Default for TapHoldConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            quick_tap_term: Duration::from_millis(150),
            streak_timeout: Duration::from_millis(200),
            shift_streak_timeout: Duration::from_millis(100),
        }
    }
}

/// Decreasing inter-tap delays of the repeat key, in milliseconds.
/// The last entry is reused once the table is exhausted.
pub const DEFAULT_REPEAT_DELAYS: [u16; 12] = [100, 90, 80, 70, 60, 50, 45, 40, 35, 30, 25, 20];

/// Configurations for the accelerating repeat key
#[derive(Clone, Copy, Debug)]
pub struct RepeatConfig {
    /// Delay between the first tap on press and the first repeated tap
    pub init_delay: Duration,
    /// Delays between following taps, in milliseconds
    pub delays: &'static [u16],
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            init_delay: Duration::from_millis(250),
            delays: &DEFAULT_REPEAT_DELAYS,
        }
    }
}

/// The config struct for the keyboard runner.
#[derive(Clone, Copy, Debug)]
pub struct KeyboardConfig {
    pub behavior: BehaviorConfig,
    /// Interval of the tick driving chord timeouts and deferred tasks
    pub tick_interval: Duration,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            tick_interval: Duration::from_millis(1),
        }
    }
}
