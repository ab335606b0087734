//! Desk bus bridge
//!
//! Sits between the desk controller and its wired keypad:
//!
//! ```text
//!            raw bytes                       raw bytes
//!  keypad ──────────────────► bridge ─────────────────────► desk
//!         ◄──────────────────        ◄─────────────────────
//!            raw bytes          │  ▲     status frames
//!                               ▼  │
//!                  buttons, height, operation ◄─► host
//! ```
//!
//! Each control cycle:
//! 1. Release a wake/preset pulse raised during the previous cycle
//! 2. Drain the desk bus: echo to the keypad, decode heights
//! 3. Run one movement step, possibly sending a drive pulse
//! 4. Drain the keypad bus: copy to the desk, decode buttons, and echo the
//!    button state as a command when no move is in progress
//! 5. Mirror the keypad signal line onto the desk signal line
//!
//! Any capability (either bus, either pin) may be missing. Operations that
//! need a missing capability do nothing.

mod report;
mod stats;

use core::fmt;

use deskbus_hal::{InputPin, OutputPin, Uart, Unconnected};
use deskbus_protocol::{
    Button, ButtonMask, Command, DeskFrameParser, FrameError, Height, Preset, RemoteFrameParser,
};

use crate::config::BridgeConfig;
use crate::motion::{MovementController, Operation};
use crate::traits::Component;

pub use report::CycleReport;
pub use stats::LinkStats;

use stats::bump;

/// Everything the bridge tracks besides its hardware handles
#[derive(Debug, Clone)]
struct BridgeState {
    config: BridgeConfig,
    desk_parser: DeskFrameParser,
    remote_parser: RemoteFrameParser,
    movement: MovementController,
    /// Last published height
    height: Option<Height>,
    /// Last decoded keypad buttons
    buttons: ButtonMask,
    /// Last reported operation
    reported_operation: Operation,
    stats: LinkStats,
    /// Last sampled level of the keypad signal line
    remote_pin_level: bool,
    /// Desk signal line was raised and must drop next cycle
    release_desk_pin: bool,
}

impl BridgeState {
    fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            desk_parser: DeskFrameParser::new(config.message_length),
            remote_parser: RemoteFrameParser::new(),
            movement: MovementController::new(),
            height: None,
            buttons: ButtonMask::NONE,
            reported_operation: Operation::Idle,
            stats: LinkStats::default(),
            remote_pin_level: false,
            release_desk_pin: false,
        }
    }

    fn record_desk_rejection(&mut self, err: FrameError) {
        if err.is_diagnostic() {
            bump(&mut self.stats.desk_checksum_errors);
            error!("desk {}", err);
        } else {
            bump(&mut self.stats.desk_discarded);
            trace!("desk frame dropped: {}", err);
        }
    }

    fn record_remote_rejection(&mut self, err: FrameError) {
        bump(&mut self.stats.remote_checksum_errors);
        error!("remote {}", err);
    }
}

/// Bridge between a desk controller, its keypad and the host
///
/// `D` and `R` are the desk and keypad transports, `W` the desk signal
/// line (output) and `S` the keypad signal line (input). Start from
/// [`DeskBridge::new`] and attach what the board provides.
pub struct DeskBridge<D = Unconnected, R = Unconnected, W = Unconnected, S = Unconnected> {
    desk: Option<D>,
    remote: Option<R>,
    desk_pin: Option<W>,
    remote_pin: Option<S>,
    state: BridgeState,
}

impl DeskBridge {
    /// Create a bridge with nothing attached
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            desk: None,
            remote: None,
            desk_pin: None,
            remote_pin: None,
            state: BridgeState::new(config),
        }
    }
}

impl<D, R, W, S> DeskBridge<D, R, W, S> {
    /// Attach the desk bus
    pub fn with_desk<T: Uart>(self, desk: T) -> DeskBridge<T, R, W, S> {
        DeskBridge {
            desk: Some(desk),
            remote: self.remote,
            desk_pin: self.desk_pin,
            remote_pin: self.remote_pin,
            state: self.state,
        }
    }

    /// Attach the keypad bus
    pub fn with_remote<T: Uart>(self, remote: T) -> DeskBridge<D, T, W, S> {
        DeskBridge {
            desk: self.desk,
            remote: Some(remote),
            desk_pin: self.desk_pin,
            remote_pin: self.remote_pin,
            state: self.state,
        }
    }

    /// Attach the desk signal line
    pub fn with_desk_pin<T: OutputPin>(self, pin: T) -> DeskBridge<D, R, T, S> {
        DeskBridge {
            desk: self.desk,
            remote: self.remote,
            desk_pin: Some(pin),
            remote_pin: self.remote_pin,
            state: self.state,
        }
    }

    /// Attach the keypad signal line
    pub fn with_remote_pin<T: InputPin>(self, pin: T) -> DeskBridge<D, R, W, T> {
        DeskBridge {
            desk: self.desk,
            remote: self.remote,
            desk_pin: self.desk_pin,
            remote_pin: Some(pin),
            state: self.state,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.state.config
    }

    /// Last height reported by the desk
    pub fn height(&self) -> Option<Height> {
        self.state.height
    }

    /// Last decoded keypad buttons
    pub fn buttons(&self) -> ButtonMask {
        self.state.buttons
    }

    /// Whether `button` was pressed in the last keypad frame
    pub fn is_pressed(&self, button: Button) -> bool {
        self.state.buttons.is_pressed(button)
    }

    /// Current operation
    pub fn operation(&self) -> Operation {
        self.state.movement.operation()
    }

    /// Movement controller state
    pub fn movement(&self) -> &MovementController {
        &self.state.movement
    }

    /// Bus counters
    pub fn stats(&self) -> &LinkStats {
        &self.state.stats
    }

    /// Desk transport, if attached
    pub fn desk_mut(&mut self) -> Option<&mut D> {
        self.desk.as_mut()
    }

    /// Keypad transport, if attached
    pub fn remote_mut(&mut self) -> Option<&mut R> {
        self.remote.as_mut()
    }

    /// Desk signal line, if attached
    pub fn desk_pin_mut(&mut self) -> Option<&mut W> {
        self.desk_pin.as_mut()
    }

    /// Keypad signal line, if attached
    pub fn remote_pin_mut(&mut self) -> Option<&mut S> {
        self.remote_pin.as_mut()
    }
}

impl<D, R, W, S> DeskBridge<D, R, W, S>
where
    D: Uart,
    R: Uart,
    W: OutputPin,
    S: InputPin,
{
    /// Start moving the desk to `target` display units
    ///
    /// Dropped when no desk bus is attached or `target` is not finite.
    pub fn move_to(&mut self, target: f32) {
        if self.desk.is_none() {
            trace!("move request dropped: no desk bus");
            return;
        }
        if !target.is_finite() {
            trace!("move request dropped: target not finite");
            return;
        }
        let operation = self.state.movement.move_to(Height::new(target));
        info!("moving to {} ({})", target, operation);
    }

    /// Stop any move in progress
    pub fn stop(&mut self) {
        self.state.movement.stop();
        info!("stop requested");
    }

    /// Recall a memory preset
    ///
    /// Raises the desk signal line for one cycle and sends the preset's
    /// button mask.
    pub fn press_preset(&mut self, preset: Preset) {
        self.raise_desk_pin();
        if self.desk.is_some() {
            info!("sending preset {} to desk", preset);
            self.send(Command::Preset(preset));
        }
    }

    /// Recall memory preset 1
    pub fn press_preset1(&mut self) {
        self.press_preset(Preset::One);
    }

    /// Recall memory preset 2
    pub fn press_preset2(&mut self) {
        self.press_preset(Preset::Two);
    }

    /// Recall memory preset 3
    pub fn press_preset3(&mut self) {
        self.press_preset(Preset::Three);
    }

    /// Send an arbitrary button state to the desk, as if from the keypad
    pub fn simulate_button_press(&mut self, mask: ButtonMask) {
        info!("simulating buttons {=u8:#x}", mask.bits());
        self.send(Command::Buttons(mask));
    }

    /// Pulse the desk signal line to wake the controller
    pub fn wake_desk(&mut self) {
        self.raise_desk_pin();
    }

    fn raise_desk_pin(&mut self) {
        if let Some(pin) = self.desk_pin.as_mut() {
            pin.set_high();
            self.state.release_desk_pin = true;
        }
    }

    fn release_desk_pin(&mut self) {
        if !self.state.release_desk_pin {
            return;
        }
        self.state.release_desk_pin = false;
        if let Some(pin) = self.desk_pin.as_mut() {
            pin.set_low();
        }
    }

    /// Write a command frame to the desk; no-op without a desk bus
    fn send(&mut self, command: Command) {
        let Some(desk) = self.desk.as_mut() else {
            return;
        };
        let frame = command.encode();
        if desk.write_all(frame.as_bytes()).is_err() {
            bump(&mut self.state.stats.transport_errors);
            warn!("desk bus write failed");
            return;
        }
        bump(&mut self.state.stats.commands_sent);
    }

    /// Read every available desk byte; returns the newest height decoded
    fn drain_desk(&mut self) -> Option<Height> {
        let desk = self.desk.as_mut()?;
        let state = &mut self.state;
        let mut latest = None;

        loop {
            let byte = match desk.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    bump(&mut state.stats.transport_errors);
                    warn!("desk bus read failed");
                    break;
                }
            };

            if state.config.forward_desk_to_remote {
                if let Some(remote) = self.remote.as_mut() {
                    forward(remote, byte, &mut state.stats);
                }
            }

            match state.desk_parser.feed(byte) {
                Ok(Some(height)) => {
                    bump(&mut state.stats.height_updates);
                    latest = Some(height);
                }
                Ok(None) => {}
                Err(err) => state.record_desk_rejection(err),
            }
        }

        latest
    }

    /// Read every available keypad byte; returns the newest button state
    fn drain_remote(&mut self) -> Option<ButtonMask> {
        let remote = self.remote.as_mut()?;
        let state = &mut self.state;
        let mut latest = None;

        loop {
            let byte = match remote.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    bump(&mut state.stats.transport_errors);
                    warn!("remote bus read failed");
                    break;
                }
            };

            if state.config.forward_remote_to_desk {
                if let Some(desk) = self.desk.as_mut() {
                    forward(desk, byte, &mut state.stats);
                }
            }

            match state.remote_parser.feed(byte) {
                Ok(Some(mask)) => {
                    bump(&mut state.stats.remote_frames);
                    latest = Some(mask);
                }
                Ok(None) => {}
                Err(err) => state.record_remote_rejection(err),
            }
        }

        latest
    }

    fn mirror_remote_pin(&mut self) {
        let Some(remote_pin) = self.remote_pin.as_mut() else {
            return;
        };
        let level = remote_pin.is_high();
        if level == self.state.remote_pin_level {
            return;
        }
        self.state.remote_pin_level = level;
        if let Some(desk_pin) = self.desk_pin.as_mut() {
            desk_pin.set_state(level);
        }
    }
}

/// Copy one raw byte onto the other bus
fn forward<T: Uart>(port: &mut T, byte: u8, stats: &mut LinkStats) {
    if port.write_all(&[byte]).is_err() {
        bump(&mut stats.transport_errors);
        return;
    }
    bump(&mut stats.bytes_forwarded);
}

impl<D, R, W, S> Component for DeskBridge<D, R, W, S>
where
    D: Uart,
    R: Uart,
    W: OutputPin,
    S: InputPin,
{
    type Report = CycleReport;

    fn initialize(&mut self) {
        if let Some(pin) = self.desk_pin.as_mut() {
            pin.set_low();
        }
        if let Some(pin) = self.remote_pin.as_mut() {
            self.state.remote_pin_level = pin.is_high();
        }
        info!(
            "desk bridge ready (message length {=u8})",
            self.state.config.message_length.as_u8()
        );
    }

    fn on_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        self.release_desk_pin();

        if let Some(height) = self.drain_desk() {
            if self.state.height != Some(height) {
                debug!("height {}", height);
                self.state.height = Some(height);
                self.state.movement.update_position(height);
                report.height = Some(height);
            }
        }

        if let Some(command) = self.state.movement.poll() {
            self.send(command);
        }

        if let Some(mask) = self.drain_remote() {
            info!("buttons from remote: {=u8:#x}", mask.bits());
            self.state.buttons = mask;
            report.buttons = Some(mask);
            if !self.state.movement.is_moving() {
                self.send(Command::Buttons(mask));
            }
        }

        self.mirror_remote_pin();

        let operation = self.state.movement.operation();
        if operation != self.state.reported_operation {
            debug!("operation {}", operation);
            self.state.reported_operation = operation;
            report.operation = Some(operation);
        }

        report
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let config = &self.state.config;
        writeln!(out, "Desk bridge")?;
        if self.desk.is_some() {
            writeln!(out, "  Message Length: {}", config.message_length.as_u8())?;
        }
        writeln!(out, "  Desk Bus: {}", attached(self.desk.is_some()))?;
        writeln!(out, "  Remote Bus: {}", attached(self.remote.is_some()))?;
        writeln!(out, "  Desk Pin: {}", attached(self.desk_pin.is_some()))?;
        writeln!(out, "  Remote Pin: {}", attached(self.remote_pin.is_some()))?;
        writeln!(
            out,
            "  Forward Remote -> Desk: {}",
            yes_no(config.forward_remote_to_desk)
        )?;
        writeln!(
            out,
            "  Forward Desk -> Remote: {}",
            yes_no(config.forward_desk_to_remote)
        )
    }
}

fn attached(present: bool) -> &'static str {
    if present {
        "attached"
    } else {
        "not attached"
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
