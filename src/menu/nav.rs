//! Dashboard / menu navigation state machine.
//!
//! [`Navigator`] owns the [`MenuTree`] together with the state that says
//! which node is on screen.  It is shared between the main loop (button
//! commands) and the periodic tasks (inactivity timeout, observed-input
//! refresh), always behind the lock in [`crate::shared::Shared`].
//!
//! Split of responsibilities:
//!   - main loop: [`Navigator::apply`], [`Navigator::take_view`],
//!     [`Navigator::finish_render`]
//!   - task context: [`Navigator::tick_inactivity`],
//!     [`Navigator::refresh_observed`]

use crate::config::{ADC_CHANGE_TOLERANCE, MENU_TIMEOUT_TICKS};
use crate::input::{AnalogInputs, Button, ButtonMask};
use crate::ui::input_logic::{wrap_next, wrap_prev};
use crate::ui::view::View;

use super::tree::{MenuTree, NodeId};

/// Which GUI is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Dashboard,
    Menu,
}

/// Logical navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Leave the dashboard for the main menu.
    Activate,
    Up,
    Down,
    /// Back out to the parent.
    Left,
    /// Descend into the highlighted child.
    Right,
}

impl Command {
    pub const fn from_button(button: Button) -> Self {
        match button {
            Button::Up => Command::Up,
            Button::Right => Command::Right,
            Button::Down => Command::Down,
            Button::Left => Command::Left,
        }
    }
}

/// What [`Navigator::apply`] did with a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Not valid in the current mode.
    Ignored,
    /// Valid, resets the inactivity timer, but nothing moved.
    Accepted,
    /// State changed; a redraw was requested.
    Changed,
}

/// Tunables for the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavConfig {
    /// Inactivity ticks tolerated in Menu mode; the menu closes on the
    /// first tick that exceeds it.
    pub menu_timeout_ticks: u32,
    /// Minimum change in an observed reading that triggers a redraw.
    pub adc_tolerance: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            menu_timeout_ticks: MENU_TIMEOUT_TICKS,
            adc_tolerance: ADC_CHANGE_TOLERANCE,
        }
    }
}

/// Pending redraw, tagged so a request made while a frame is being
/// drawn is not lost when that frame completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawTicket(u32);

pub struct Navigator {
    tree: MenuTree,
    config: NavConfig,
    mode: Mode,
    active: NodeId,
    needs_redraw: bool,
    redraw_epoch: u32,
    inactivity_ticks: u32,
}

impl Navigator {
    /// Start on the dashboard with an initial paint pending.
    pub fn new(tree: MenuTree, config: NavConfig) -> Self {
        let active = tree.root();
        Self {
            tree,
            config,
            mode: Mode::Dashboard,
            active,
            needs_redraw: true,
            redraw_epoch: 0,
            inactivity_ticks: 0,
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active(&self) -> NodeId {
        self.active
    }

    /// `(mode, active)` read together.
    pub fn position(&self) -> (Mode, NodeId) {
        (self.mode, self.active)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn inactivity_ticks(&self) -> u32 {
        self.inactivity_ticks
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
        self.redraw_epoch = self.redraw_epoch.wrapping_add(1);
    }

    /// Translate this iteration's presses into commands and apply them.
    ///
    /// On the dashboard any press means [`Command::Activate`] and the
    /// rest of the mask is consumed with it.  In the menu each pressed
    /// button is applied in Up, Right, Down, Left order.
    pub fn apply_presses(&mut self, pressed: ButtonMask) {
        if pressed.is_empty() {
            return;
        }
        match self.mode {
            Mode::Dashboard => {
                self.apply(Command::Activate);
            }
            Mode::Menu => {
                for button in pressed.iter() {
                    self.apply(Command::from_button(button));
                }
            }
        }
    }

    /// Apply one command.  Total: never leaves `active` outside the tree
    /// or a cursor out of range.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let outcome = match (self.mode, command) {
            (Mode::Dashboard, Command::Activate) => self.activate(),
            (Mode::Dashboard, _) | (Mode::Menu, Command::Activate) => Outcome::Ignored,
            (Mode::Menu, Command::Up) => self.move_cursor(wrap_prev),
            (Mode::Menu, Command::Down) => self.move_cursor(wrap_next),
            (Mode::Menu, Command::Right) => self.descend(),
            (Mode::Menu, Command::Left) => self.ascend(),
        };

        if outcome != Outcome::Ignored && self.mode == Mode::Menu {
            self.inactivity_ticks = 0;
        }
        if outcome == Outcome::Changed {
            self.request_redraw();
        }
        trace!("Nav: {} -> {}", command, outcome);
        outcome
    }

    fn activate(&mut self) -> Outcome {
        let Some(menu_head) = self.tree.node(self.tree.root()).children().first().copied() else {
            warn!("Nav: dashboard has no menu to open");
            return Outcome::Accepted;
        };
        self.active = menu_head;
        self.mode = Mode::Menu;
        self.inactivity_ticks = 0;
        debug!("Nav: menu opened");
        Outcome::Changed
    }

    fn move_cursor(&mut self, step: fn(usize, usize) -> usize) -> Outcome {
        let Some(node) = self.tree.get_mut(self.active) else {
            return Outcome::Accepted;
        };
        let count = node.children().len();
        if count == 0 {
            return Outcome::Accepted;
        }
        let next = step(node.selected(), count);
        match node.set_selected(next) {
            Some(_) => Outcome::Changed,
            None => Outcome::Accepted,
        }
    }

    fn descend(&mut self) -> Outcome {
        let node = self.tree.node(self.active);
        match node.selected_child() {
            Some(child) if self.tree.node(child).has_children() => {
                self.active = child;
                Outcome::Changed
            }
            // leaf: nothing to open
            _ => Outcome::Accepted,
        }
    }

    fn ascend(&mut self) -> Outcome {
        let Some(parent) = self.tree.node(self.active).parent() else {
            return Outcome::Accepted;
        };
        self.active = parent;
        if parent == self.tree.root() {
            self.mode = Mode::Dashboard;
            self.inactivity_ticks = 0;
            debug!("Nav: back to dashboard");
        }
        Outcome::Changed
    }

    /// Advance the inactivity counter by one tick (task context).
    ///
    /// Returns `true` when this tick closed the menu.
    pub fn tick_inactivity(&mut self) -> bool {
        if self.mode != Mode::Menu {
            return false;
        }
        self.inactivity_ticks = self.inactivity_ticks.saturating_add(1);
        if self.inactivity_ticks <= self.config.menu_timeout_ticks {
            return false;
        }
        info!("Nav: menu timeout after {} ticks", self.inactivity_ticks);
        self.active = self.tree.root();
        self.mode = Mode::Dashboard;
        self.inactivity_ticks = 0;
        self.request_redraw();
        true
    }

    /// Re-read the active node's observed inputs (task context) and
    /// request a redraw if any moved by more than the tolerance.
    ///
    /// Returns `true` if a redraw was requested.
    pub fn refresh_observed<A: AnalogInputs>(&mut self, inputs: &mut A) -> bool {
        let tolerance = self.config.adc_tolerance;
        let Some(node) = self.tree.get_mut(self.active) else {
            return false;
        };
        let mut changed = false;
        for observed in node.observed_mut() {
            let value = inputs.read_analog(observed.pin);
            if value.abs_diff(observed.last) > tolerance {
                trace!("Pin {}: {} -> {}", observed.pin, observed.last, value);
                observed.last = value;
                changed = true;
            }
        }
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Snapshot the active node for drawing if a redraw is pending.
    ///
    /// The redraw flag stays set; pass the ticket to
    /// [`Navigator::finish_render`] once the frame is on screen.
    pub fn take_view(&self) -> Option<(View, RedrawTicket)> {
        if !self.needs_redraw {
            return None;
        }
        Some((View::of(&self.tree, self.active), RedrawTicket(self.redraw_epoch)))
    }

    /// Clear the redraw flag unless a newer request arrived after the
    /// ticket was issued.
    pub fn finish_render(&mut self, ticket: RedrawTicket) {
        if ticket.0 == self.redraw_epoch {
            self.needs_redraw = false;
        }
    }
}
