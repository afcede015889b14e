//! Refresh task
//!
//! Self-rearming 100 ms tick: bump the tick counter, consume the selector
//! code (resetting it to idle), dispatch the selected source to the
//! rendering engine, re-arm unconditionally. A single task instance on one
//! executor, so tick bodies can never overlap.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use udas_core::selector::{RefreshSource, IDLE_CODE};
use udas_drivers::ssd1963::{run_refresh, GpioBus, RefreshConfig, Ssd1963};

use crate::board::{ControlPin, DataPin};
use crate::channels::{self, FRAME, SOURCE_CODE, UPDATE_COUNT};

pub type Display = Ssd1963<GpioBus<ControlPin, DataPin>>;

/// Refresh task - paints the selected source every tick
#[embassy_executor::task]
pub async fn refresh_task(mut disp: Display) {
    info!("Refresh task started");

    let config = RefreshConfig::default();
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms));

    loop {
        ticker.next().await;

        // Counts every tick, idle included, so the host can see the
        // scheduler is alive even when nothing is selected
        UPDATE_COUNT.fetch_add(1, Ordering::Relaxed);

        let code = SOURCE_CODE.swap(IDLE_CODE, Ordering::AcqRel);
        let source = RefreshSource::from_code(code);
        let target = channels::target_rect();

        let outcome = match source {
            RefreshSource::FrameBuffer => {
                // Hold the region lock for the whole blit so a producer
                // write cannot land mid-frame
                let guard = FRAME.lock().await;
                let frame = guard.as_ref().and_then(|t| t.contents());
                run_refresh(&mut disp, source, frame, target)
            }
            _ => run_refresh(&mut disp, source, None, target),
        };

        if let Some(outcome) = outcome {
            trace!("refresh tick code={}: {}", code, outcome);
        }
    }
}
