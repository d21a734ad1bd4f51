use crate::ui;
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use six_chamber::{
    AppController,
    FireOutcome,
    config::AppConfig,
};
use std::time::{
    Duration,
    Instant,
};
use tokio::time::{
    self,
    MissedTickBehavior,
};
use tracing::info;

/// Display refresh cadence feeding the frame-rate readout.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub async fn run_app(config: AppConfig) -> Result<()> {
    let mut controller = AppController::new(&config);
    let mut ui_state = ui::UiState::default();
    let mut input_events = ui::input_event_stream();

    info!("Starting UI");
    ui::terminal_enter(&mut ui_state)?;
    info!("UI ready");
    let res = run_loop(&mut controller, &mut ui_state, &mut input_events).await;
    controller.shutdown();
    ui::terminal_exit(&mut ui_state)?;
    res
}

async fn run_loop(
    controller: &mut AppController,
    ui_state: &mut ui::UiState,
    input_events: &mut ui::InputEventReceiver,
) -> Result<()> {
    info!("Running app loop");
    let mut frames = time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ui::draw(ui_state, &controller.snapshot()).wrap_err("initial draw failed")?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => { break; }
            _ = frames.tick() => {
                if controller.record_frame(Instant::now()) {
                    ui::draw(ui_state, &controller.snapshot())
                        .wrap_err("draw after frame-rate update failed")?;
                }
            }
            event = controller.next_timer_event() => {
                controller.handle_timer_event(event);
                ui::draw(ui_state, &controller.snapshot())
                    .wrap_err("draw after spin tick failed")?;
            }
            raw_ev = ui::next_raw_event(input_events) => {
                let event = raw_ev?;
                let Some(ev) = ui::interpret_event(ui_state, event) else {
                    continue;
                };
                match ev {
                    ui::UserEvent::Quit => break,
                    ui::UserEvent::Start => {
                        controller.start_game();
                    }
                    ui::UserEvent::Fire => {
                        if let FireOutcome::Fatal(chamber) = controller.fire_gun() {
                            info!(%chamber, "round finished");
                        }
                    }
                    ui::UserEvent::PlayAgain => controller.reset_game(),
                    ui::UserEvent::Redraw => {}
                }
                ui::draw(ui_state, &controller.snapshot())
                    .wrap_err("draw after input failed")?;
            }
        }
    }
    Ok(())
}
