//! HD44780 16x2 character display on a 4-bit bus.
//!
//! # Wiring
//!
//! Six outputs: RS (register select), E (enable strobe) and D4..D7. The R/W line
//! is tied to ground, so the driver never reads the busy flag and relies on
//! fixed delays instead.
//!
//! # Protocol
//!
//! Every byte goes out as two nibbles, high nibble first. For each nibble the
//! data lines are driven, then E is pulsed low -> high -> low with a 1 ms hold
//! after each edge. RS is low for commands and high for character data.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::hal::DigitalOutput;
use crate::units::TemperatureUnit;

/// Characters per display line.
pub const LCD_WIDTH: usize = 16;

/// Set-DDRAM-address command for line 1.
pub const LCD_LINE_1: u8 = 0x80;

/// Set-DDRAM-address command for line 2.
pub const LCD_LINE_2: u8 = 0xC0;

/// Clear display command.
pub const LCD_CLEAR: u8 = 0x01;

/// Initialization commands, in order:
/// 0x33/0x32 force 4-bit mode, 0x06 entry mode (cursor right), 0x0C display on
/// with cursor off, 0x28 two-line 5x8 font, 0x01 clear.
pub const LCD_INIT_SEQUENCE: [u8; 6] = [0x33, 0x32, 0x06, 0x0C, 0x28, LCD_CLEAR];

/// Hold time after each enable edge.
pub const ENABLE_HOLD_US: u32 = 1_000;

/// Settle time after the initialization sequence.
pub const INIT_SETTLE_US: u32 = 500;

/// Longest message [`format_message`] can produce: `"Temp: "`, a sign, the
/// 39 integer digits of `f32::MAX`, two decimals and the unit symbol.
pub const MESSAGE_CAPACITY: usize = 50;

/// Register selected by the RS line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// Instruction register (RS low).
    Command,
    /// Data register (RS high).
    Data,
}

/// The six bus lines.
pub struct LcdPins<P> {
    /// Register select.
    pub rs: P,
    /// Enable strobe.
    pub e: P,
    /// Data lines D4, D5, D6, D7.
    pub data: [P; 4],
}

/// HD44780 driver over [`DigitalOutput`] lines.
pub struct Hd44780<P, D> {
    pins: LcdPins<P>,
    delay: D,
}

impl<P: DigitalOutput, D: DelayNs> Hd44780<P, D> {
    /// Wrap the bus. Call [`Self::init`] before writing text.
    pub const fn new(
        pins: LcdPins<P>,
        delay: D,
    ) -> Self {
        Self { pins, delay }
    }

    /// Send the power-on sequence and wait for the controller to settle.
    pub fn init(&mut self) {
        for command in LCD_INIT_SEQUENCE {
            self.write_byte(command, Register::Command);
        }
        self.delay.delay_us(INIT_SETTLE_US);
    }

    /// Clear the display and home the cursor.
    pub fn clear(&mut self) { self.write_byte(LCD_CLEAR, Register::Command); }

    /// Write a full byte to the selected register.
    pub fn write_byte(
        &mut self,
        bits: u8,
        register: Register,
    ) {
        self.pins.rs.set_level(register == Register::Data);
        self.write_nibble(bits >> 4);
        self.write_nibble(bits & 0x0F);
    }

    fn write_nibble(
        &mut self,
        nibble: u8,
    ) {
        for (bit, line) in self.pins.data.iter_mut().enumerate() {
            line.set_level(nibble & (1 << bit) != 0);
        }
        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        self.pins.e.set_low();
        self.delay.delay_us(ENABLE_HOLD_US);
        self.pins.e.set_high();
        self.delay.delay_us(ENABLE_HOLD_US);
        self.pins.e.set_low();
        self.delay.delay_us(ENABLE_HOLD_US);
    }

    /// Write `text` at the start of a line, space-filled to [`LCD_WIDTH`].
    ///
    /// `line` is the address command ([`LCD_LINE_1`] or [`LCD_LINE_2`]).
    /// Text longer than the line is sent as-is; the controller drops what
    /// does not fit on the glass.
    pub fn write_line(
        &mut self,
        text: &str,
        line: u8,
    ) {
        self.write_byte(line, Register::Command);
        let mut sent = 0;
        for byte in text.bytes() {
            self.write_byte(byte, Register::Data);
            sent += 1;
        }
        for _ in sent..LCD_WIDTH {
            self.write_byte(b' ', Register::Data);
        }
    }

    /// Show a reading on line 1 in the given unit.
    pub fn show_temperature(
        &mut self,
        celsius: f32,
        unit: TemperatureUnit,
    ) {
        let message = format_message(celsius, unit);
        self.write_line(&message, LCD_LINE_1);
    }

    /// Give the bus back.
    pub fn release(self) -> (LcdPins<P>, D) { (self.pins, self.delay) }
}

/// `"Temp: {value:.2}{unit}"`, space-filled to [`LCD_WIDTH`] characters.
///
/// `celsius` is converted when `unit` is Fahrenheit. Messages longer than the
/// line are returned whole.
pub fn format_message(
    celsius: f32,
    unit: TemperatureUnit,
) -> String<MESSAGE_CAPACITY> {
    let mut message: String<MESSAGE_CAPACITY> = String::new();
    let value = unit.from_celsius(celsius);
    write!(message, "Temp: {:.2}{}", value, unit.symbol()).ok();
    while message.len() < LCD_WIDTH {
        message.push(' ').ok();
    }
    message
}
