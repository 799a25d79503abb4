#![no_std]
#![no_main]

// https://dev.to/theembeddedrustacean/embedded-rust-embassy-gpio-button-controlled-blinking-3ee6
// https://www.youtube.com/watch?v=dab_vzVDr_M

use crossing_fsm::{Controller, StateId};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::Timer;
use panic_halt as _;

mod io;
use io::{Board, EmbassyTimer, Heartbeat};

// The state the controller last moved to. Only read by the heartbeat.
static ENTERED: Signal<ThreadModeRawMutex, StateId> = Signal::new();

/*
 * Blip the on-board LED on every state change. This task only watches; the
 * controller never waits for it.
 */
#[embassy_executor::task]
async fn heartbeat_task(mut led: Heartbeat) -> ! {
    loop {
        let state = ENTERED.wait().await;
        info!("entered {} (id {})", state, state.id());

        led.set(true);
        Timer::after_millis(50).await;
        led.set(false);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let peripherals = embassy_stm32::init(Default::default());
    let board = Board::new(peripherals);
    info!("crossing I/O configured");

    spawner.spawn(heartbeat_task(board.heartbeat)).unwrap();

    let mut controller = Controller::new(board.lights, board.sensors, EmbassyTimer);
    loop {
        let state = controller.step().await;
        ENTERED.signal(state);
    }
}
