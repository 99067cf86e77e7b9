//! Debug page: face state, runtime counters and the on-device event log.

use core::fmt::Write;

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;
use profont::PROFONT_7_POINT;
use watchface_common::colors::{BACKGROUND, FOREGROUND};
use watchface_common::config::SCREEN_WIDTH;
use watchface_common::{Region, WatchFace};

use crate::runtime::RuntimeStats;

const HEADER_Y: i32 = 9;
const HEADER_DIVIDER_Y: i32 = 13;
const STATS_Y: i32 = 23;
const STAT_LINE_HEIGHT: i32 = 9;
const LOG_DIVIDER_Y: i32 = 88;
const LOG_Y: i32 = 98;
const LOG_LINE_HEIGHT: i32 = 9;
const COL_X: i32 = 2;

const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_7_POINT, FOREGROUND);
const DIVIDER_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(FOREGROUND, 1);

pub fn draw_debug_page<D>(
    display: &mut D,
    face: &WatchFace,
    stats: &RuntimeStats,
    now: &NaiveDateTime,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BACKGROUND).ok();
    draw_header(display, now);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_state(display, face, stats);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log(display, face);
}

fn draw_header<D>(
    display: &mut D,
    now: &NaiveDateTime,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut s: String<24> = String::new();
    write!(s, "DEBUG {:02}:{:02}:{:02}", now.hour(), now.minute(), now.second()).ok();
    Text::new(&s, Point::new(COL_X, HEADER_Y), TEXT_STYLE)
        .draw(display)
        .ok();
}

fn draw_state<D>(
    display: &mut D,
    face: &WatchFace,
    stats: &RuntimeStats,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let battery = face.battery();
    let lines: [String<28>; 7] = [
        line(format_args!("phase {}", face.phase())),
        line(format_args!("power {} {}", face.power_mode(), face.tick_unit())),
        line(format_args!("{}", face.placement())),
        line(format_args!("bat {}% {}", battery.percent, if battery.plugged { "chg" } else { "" })),
        line(format_args!("bt {}", if face.bluetooth_connected() { "on" } else { "off" })),
        line(format_args!("tick {} tmr {}", stats.ticks, stats.timer_firings)),
        line(format_args!(
            "h{} m{} s{} i{}",
            stats.requests_for(Region::HourHand),
            stats.requests_for(Region::MinuteHand),
            stats.requests_for(Region::SecondHand),
            stats.requests_for(Region::Indicators)
        )),
    ];

    let mut y = STATS_Y;
    for s in &lines {
        Text::new(s, Point::new(COL_X, y), TEXT_STYLE)
            .draw(display)
            .ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn draw_log<D>(
    display: &mut D,
    face: &WatchFace,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut y = LOG_Y;
    for entry in face.log().iter() {
        let mut s: String<28> = String::new();
        write!(s, ">{entry}").ok();
        Text::new(&s, Point::new(COL_X, y), TEXT_STYLE)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }
}

fn draw_horizontal_line<D>(
    display: &mut D,
    y: i32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(Point::new(0, y), Point::new(SCREEN_WIDTH as i32 - 1, y))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

fn line(args: core::fmt::Arguments<'_>) -> String<28> {
    let mut s = String::new();
    s.write_fmt(args).ok();
    s
}
