//! Now-playing monitor driven by a scripted controller
//!
//! Run with `MEDIA_SESSION_LOG_MODE=development` to see the dispatcher's
//! own log output alongside the handler output.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use session_events::prelude::*;
use session_events::testing::{FakeController, FakeSession};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    session_events::init_logging_from_env()?;

    let controller = Arc::new(FakeController::new());
    let session = FakeSession::new(Arc::clone(&controller));
    let looper = Looper::spawn("media-main")?;

    let config = DispatchConfig::new().on_looper(&looper).with_label("now-playing");
    let handle = configure_session_with(&session, config, |events| {
        events
            .on_state_changed(|_ctx, previous, state| {
                println!("state: {} -> {}", previous, state.state);
            })
            .on_started_playing(|ctx| println!("started playing at {}", ctx.position()))
            .on_paused(|ctx| println!("paused at {}", ctx.position()))
            .on_stopped_playing(|_ctx| println!("stopped"))
            .on_position_changed(|_ctx, position| println!("position: {}", position))
            .on_metadata_changed(|_ctx, metadata| {
                println!(
                    "now playing: {} by {}",
                    metadata.title.as_deref().unwrap_or("?"),
                    metadata.artist.as_deref().unwrap_or("?")
                );
            })
            .on_session_destroyed(|_ctx| println!("session closed"));
    })?;

    controller.set_metadata(Metadata::with_title("Intro").artist("The Band"));
    controller.report(PlaybackStateKind::Buffering, Position::Millis(0));
    controller.report(PlaybackStateKind::Playing, Position::Millis(0));
    controller.report(PlaybackStateKind::Playing, Position::Millis(1_000));
    controller.report(PlaybackStateKind::Paused, Position::Millis(1_000));
    controller.report(PlaybackStateKind::Stopped, Position::Unknown);
    controller.report(PlaybackStateKind::Playing, Position::Millis(0));
    controller.destroy();

    thread::sleep(Duration::from_millis(100));
    println!("still listening: {}", handle.is_listening());

    looper.quit();
    Ok(())
}
