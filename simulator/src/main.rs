//! Analog watch face simulator.
//!
//! Stands in for the watch runtime: it owns the virtual clock, the tick
//! subscription, the one-shot timer queue and the compositor, and drives the
//! face from `watchface-common` through its handlers.
//!
//! Headless by default: runs `--duration` virtual seconds and prints the final
//! frame. Build with `--features sdl` and pass `--window` for an interactive
//! window.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod cli;
mod clock;
mod framebuffer;
mod host;
mod logger;
mod runtime;
mod screens;
mod timing;
#[cfg(feature = "sdl")]
mod window;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use watchface_common::{Element, Region};

use crate::cli::Cli;
use crate::framebuffer::Framebuffer;
use crate::runtime::Runtime;
use crate::screens::draw_debug_page;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level)?;

    let options = cli.runtime_options()?;
    info!("starting at {} with battery {}", options.start, options.battery);
    let mut runtime = Runtime::new(options).context("failed to start the watch face")?;

    if cli.window {
        return run_window(&mut runtime, cli.speed);
    }

    run_headless(&mut runtime, cli.duration, cli.debug_page);
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_window(
    runtime: &mut Runtime,
    speed: f64,
) -> Result<()> {
    window::run(runtime, speed)
}

#[cfg(not(feature = "sdl"))]
fn run_window(
    _runtime: &mut Runtime,
    _speed: f64,
) -> Result<()> {
    anyhow::bail!("--window needs the simulator built with `--features sdl`")
}

fn run_headless(
    runtime: &mut Runtime,
    duration_s: u64,
    debug_page: bool,
) {
    runtime.run_until(duration_s * 1000);

    print!("{}", runtime.display().to_ascii());

    let face = runtime.face();
    let stats = runtime.stats();
    println!("time       {}", runtime.now());
    println!("phase      {}", face.phase());
    println!("power      {} ({} ticks)", face.power_mode(), face.tick_unit());
    let (subscribes, unsubscribes) = runtime.host().subscription_changes();
    println!("tick subs  {subscribes} subscribe / {unsubscribes} unsubscribe");
    println!("placement  {}", face.placement());
    let host = runtime.host();
    if let (Some(status), Some(date)) = (host.frame(Element::StatusCluster), host.frame(Element::Date)) {
        println!("frames     status {:?} date {:?}", status.top_left, date.top_left);
    }
    println!("battery    {}", face.battery());
    println!("bluetooth  {}", if face.bluetooth_connected() { "connected" } else { "disconnected" });
    println!("ticks      {}", stats.ticks);
    println!("timers     {} ({} pending)", stats.timer_firings, host.pending_timers());
    println!("composites {}", stats.composites);
    for region in Region::Z_ORDER {
        println!("  {:<11}{}", region.name(), stats.requests_for(region));
    }

    if debug_page {
        let mut page = Framebuffer::new();
        draw_debug_page(&mut page, face, stats, &runtime.now());
        print!("{}", page.to_ascii());
    }
}
