//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, task periods, thresholds, and bus constants live
//! here so they can be tuned in one place.  Time is expressed in scheduler
//! ticks (1 tick = 1 ms on the target) or in invocations of a specific
//! task, never in wall-clock units inside the logic modules.

// Scheduler

/// Scheduler tick length on the target (ms).
pub const TICK_MS: u64 = 1;

/// Inbound CAN drain period (ticks). ~333 Hz.
pub const CAN_RX_PERIOD_TICKS: u32 = 3;

/// Button debounce + outbound CAN drain period (ticks). 50 Hz.
pub const DEBOUNCE_PERIOD_TICKS: u32 = 20;

/// Observed-input refresh + menu inactivity period (ticks). 2 Hz.
pub const PIN_WATCH_PERIOD_TICKS: u32 = 500;

/// Heartbeat period (ticks). 1 Hz.
pub const HEARTBEAT_PERIOD_TICKS: u32 = 1000;

// Buttons
//
//   Button UP    → PB12
//   Button RIGHT → PB13
//   Button DOWN  → PB14
//   Button LEFT  → PB15
//
// All four are active-low with internal pull-ups.  Pin ids below are the
// logical ids used by `DigitalInputs`; the concrete pins are bound in
// `hw::buttons`.

/// Number of navigation buttons.
pub const BUTTON_COUNT: usize = 4;

/// Logical pin id of the first button; the rest follow sequentially.
pub const FIRST_BUTTON_PIN: u8 = 5;

/// Level read from a button pin while it is pressed.
pub const BUTTON_PRESSED_LEVEL: bool = false;

/// Consecutive identical debounce ticks before an edge is accepted.
/// 4 ticks at 50 Hz = 80 ms.
pub const DEBOUNCE_STABLE_TICKS: u8 = 4;

/// Debounce ticks a button must stay pressed before `Held` fires.
/// 50 ticks at 50 Hz = 1 s.
pub const HOLD_TICKS: u16 = 50;

// Menu

/// Maximum node label length (bytes).
pub const MAX_NODE_NAME: usize = 20;

/// Label given to nodes created without a name.
pub const DEFAULT_NODE_NAME: &str = "- - no name - -";

/// Maximum number of nodes in the menu tree.
pub const MAX_NODES: usize = 32;

/// Maximum children under a single node.
pub const MAX_CHILDREN: usize = 8;

/// Maximum observed inputs per node.
pub const MAX_OBSERVED_PINS: usize = 10;

/// Pin-watch ticks without input before the menu falls back to the
/// dashboard. 10 ticks at 2 Hz = 5 s.
pub const MENU_TIMEOUT_TICKS: u32 = 10;

/// Minimum change in an observed ADC reading that triggers a redraw.
pub const ADC_CHANGE_TOLERANCE: u32 = 3;

// Analog channels (logical ids = ADC1 channel numbers, bound in `hw::analog`)
//
//   Throttle → PA0 (IN0)
//   Sensor 1 → PA1 (IN1)
//   Sensor 2 → PA4 (IN4)
//   Sensor 3 → PB0 (IN8)

/// Throttle position sensor.
pub const THROTTLE_PIN: u8 = 0;

/// Sensor channels shown under the "Sensors" menu.
pub const SENSOR_PINS: [u8; 3] = [1, 4, 8];

// CAN (CAN1, RX PA11 / TX PA12)

/// CAN bus bitrate (bit/s).
pub const CAN_BITRATE: u32 = 500_000;

/// Standard id used for the heartbeat frame.
pub const HEARTBEAT_CAN_ID: u16 = 0x222;

/// Depth of the outbound frame queue.
pub const CAN_TX_QUEUE_DEPTH: usize = 8;

/// Upper bound on driver polls per drain invocation.
pub const CAN_MAX_DRAIN_PER_CALL: usize = 16;

// Displays

/// I²C address of the primary (left) SSD1306.
pub const PRIMARY_DISPLAY_ADDR: u8 = 0x3C;

/// I²C address of the secondary (right) SSD1306.
pub const SECONDARY_DISPLAY_ADDR: u8 = 0x3D;

//   Primary   → I2C1, SCL PB8 / SDA PB9
//   Secondary → I2C2, SCL PB10 / SDA PC12

/// I²C bus frequency for both displays (Hz).
pub const DISPLAY_I2C_HZ: u32 = 400_000;
