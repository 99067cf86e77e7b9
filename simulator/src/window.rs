//! Interactive SDL window.
//!
//! Virtual time follows real time scaled by `--speed`. Keys:
//!
//! | Key       | Action                     |
//! |-----------|----------------------------|
//! | `B` / `N` | battery -10% / +10%        |
//! | `P`       | toggle charger             |
//! | `C`       | toggle bluetooth           |
//! | `D`       | toggle debug page          |
//! | `Q`/`Esc` | quit                       |

use std::thread;
use std::time::Instant;

use anyhow::Result;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::info;
use watchface_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::runtime::Runtime;
use crate::screens::draw_debug_page;
use crate::timing::FRAME_TIME;

pub fn run(
    runtime: &mut Runtime,
    speed: f64,
) -> Result<()> {
    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .scale(3)
        .theme(BinaryColorTheme::LcdWhite)
        .build();
    let mut window = Window::new("Watch Face Sim", &output_settings);

    display.draw_iter(runtime.display().pixels()).ok();
    window.update(&display);

    let started = Instant::now();
    let mut show_debug = false;

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::B => runtime.adjust_battery(-10),
                        Keycode::N => runtime.adjust_battery(10),
                        Keycode::P => runtime.toggle_plugged(),
                        Keycode::C => runtime.toggle_bluetooth(),
                        Keycode::D => {
                            show_debug = !show_debug;
                            info!("debug page {}", if show_debug { "on" } else { "off" });
                        }
                        Keycode::Q | Keycode::Escape => break 'running,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let virtual_ms = (started.elapsed().as_secs_f64() * 1000.0 * speed) as u64;
        runtime.run_until(virtual_ms);

        if show_debug {
            draw_debug_page(&mut display, runtime.face(), runtime.stats(), &runtime.now());
        } else {
            display.draw_iter(runtime.display().pixels()).ok();
        }
        window.update(&display);

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    Ok(())
}
