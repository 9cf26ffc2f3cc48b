//! dashcluster - instrument cluster firmware for STM32F446.
//!
//! Two execution contexts:
//!   - an interrupt-priority executor runs the 1 ms tick that drives the
//!     periodic tasks (CAN receive, debounce, pin watch, heartbeat)
//!   - the thread-mode executor runs the cooperative main loop that turns
//!     button events into navigation and repaints both displays
//!
//! They meet only in [`Shared`]: the navigator behind a critical-section
//! mutex and the lock-free button event accumulator.

#![no_std]
#![no_main]

mod hw;

use cortex_m_rt::entry;
use dashcluster::bus::BusPump;
use dashcluster::config::{DISPLAY_I2C_HZ, SENSOR_PINS, THROTTLE_PIN, TICK_MS};
use dashcluster::input::ButtonBank;
use dashcluster::menu::{build_default_tree, MenuTree, NavConfig, Navigator};
use dashcluster::sched::Scheduler;
use dashcluster::shared::Shared;
use dashcluster::tasks::Tasks;
use dashcluster::ui;
use defmt::{info, unwrap, warn};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_stm32::adc::{Adc, AdcChannel, SampleTime};
use embassy_stm32::can::{
    Can, Rx0InterruptHandler, Rx1InterruptHandler, SceInterruptHandler, TxInterruptHandler,
};
use embassy_stm32::gpio::{Input, Pull};
use embassy_stm32::i2c::I2c;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::peripherals::CAN1;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, Config};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hw::analog::AnalogPins;
use hw::buttons::ButtonPins;
use hw::can::BxCan;
use hw::display::{BoardDisplays, Displays};

bind_interrupts!(struct Irqs {
    CAN1_RX0 => Rx0InterruptHandler<CAN1>;
    CAN1_RX1 => Rx1InterruptHandler<CAN1>;
    CAN1_SCE => SceInterruptHandler<CAN1>;
    CAN1_TX => TxInterruptHandler<CAN1>;
});

type SharedState = Shared<CriticalSectionRawMutex>;

static SHARED: StaticCell<SharedState> = StaticCell::new();
static EXECUTOR_TICK: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MAIN: StaticCell<Executor> = StaticCell::new();

// UART4 is unused and serves as the software interrupt for the tick executor.
#[interrupt]
unsafe fn UART4() {
    EXECUTOR_TICK.on_interrupt()
}

#[entry]
fn main() -> ! {
    let p = embassy_stm32::init(Config::default());
    info!("dashcluster starting");

    // ── Menu state ─────────────────────────────────────────────────────
    let tree = match build_default_tree() {
        Ok(tree) => tree,
        Err(e) => {
            warn!("Menu: {}, starting with a bare dashboard", e);
            MenuTree::new("Dashboard")
        }
    };
    let shared: &'static SharedState =
        SHARED.init(Shared::new(Navigator::new(tree, NavConfig::default())));

    // ── Inputs ─────────────────────────────────────────────────────────
    let buttons = ButtonPins::new([
        Input::new(p.PB12, Pull::Up),
        Input::new(p.PB13, Pull::Up),
        Input::new(p.PB14, Pull::Up),
        Input::new(p.PB15, Pull::Up),
    ]);

    let mut adc = Adc::new(p.ADC1);
    adc.set_sample_time(SampleTime::CYCLES144);
    let analog = AnalogPins::new(
        adc,
        [
            (THROTTLE_PIN, p.PA0.degrade_adc()),
            (SENSOR_PINS[0], p.PA1.degrade_adc()),
            (SENSOR_PINS[1], p.PA4.degrade_adc()),
            (SENSOR_PINS[2], p.PB0.degrade_adc()),
        ],
    );

    // ── CAN + displays ─────────────────────────────────────────────────
    let can = Can::new(p.CAN1, p.PA11, p.PA12, Irqs);

    let i2c1 = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, Hertz(DISPLAY_I2C_HZ), Default::default());
    let i2c2 = I2c::new_blocking(p.I2C2, p.PB10, p.PC12, Hertz(DISPLAY_I2C_HZ), Default::default());
    let displays = Displays::new(i2c1, i2c2);

    // ── Executors ──────────────────────────────────────────────────────
    interrupt::UART4.set_priority(Priority::P6);
    let spawner = EXECUTOR_TICK.start(interrupt::UART4);
    unwrap!(spawner.spawn(tick_task(shared, can, buttons, analog)));

    let executor = EXECUTOR_MAIN.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(main_loop(shared, displays)));
    })
}

/// Free-running scheduler tick count.
fn now_ticks() -> u32 {
    (Instant::now().as_millis() / TICK_MS) as u32
}

/// Periodic-task context: run whatever the scheduler says is due, once
/// per tick.
#[embassy_executor::task]
async fn tick_task(
    shared: &'static SharedState,
    can: Can<'static>,
    buttons: ButtonPins,
    analog: AnalogPins,
) {
    let bus = BxCan::start(can).await;
    let mut tasks = Tasks::new(
        shared,
        ButtonBank::default(),
        BusPump::default(),
        bus,
        buttons,
        analog,
    );
    let mut scheduler = Scheduler::new(now_ticks());
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    info!("Tasks: running");
    loop {
        ticker.next().await;
        tasks.run_due(&mut scheduler, now_ticks());
    }
}

/// Main loop: navigation and rendering.
#[embassy_executor::task]
async fn main_loop(shared: &'static SharedState, mut displays: BoardDisplays) {
    loop {
        ui::poll(shared, &mut displays);
        Timer::after(Duration::from_millis(TICK_MS)).await;
    }
}
