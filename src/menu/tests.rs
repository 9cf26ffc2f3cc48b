//! Navigation state machine tests.
//!
//! These run on the host and drive the navigator directly, one command
//! or tick at a time.

use super::nav::{Command, Mode, NavConfig, Navigator, Outcome};
use super::tree::{MenuTree, NodeId, NodeKind};
use super::build_default_tree;
use crate::input::{AnalogInputs, Button, ButtonMask, PinId};
use crate::ui::view::View;

const TIMEOUT: u32 = 4;

fn config() -> NavConfig {
    NavConfig {
        menu_timeout_ticks: TIMEOUT,
        adc_tolerance: 3,
    }
}

fn navigator() -> Navigator {
    Navigator::new(build_default_tree().unwrap(), config())
}

fn name(nav: &Navigator, id: NodeId) -> &str {
    nav.tree().node(id).name()
}

fn active_name(nav: &Navigator) -> &str {
    name(nav, nav.active())
}

fn selected(nav: &Navigator) -> usize {
    nav.tree().node(nav.active()).selected()
}

struct Adc([u32; 16]);

impl AnalogInputs for Adc {
    fn read_analog(&mut self, pin: PinId) -> u32 {
        self.0[pin as usize]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Dashboard mode
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn starts_on_dashboard_with_initial_paint_pending() {
    let nav = navigator();
    assert_eq!(nav.position(), (Mode::Dashboard, nav.tree().root()));
    assert!(nav.needs_redraw());
}

#[test]
fn activate_opens_first_child_of_root() {
    let mut nav = navigator();
    assert_eq!(nav.apply(Command::Activate), Outcome::Changed);
    assert_eq!(nav.mode(), Mode::Menu);
    assert_eq!(nav.active(), nav.tree().node(nav.tree().root()).children()[0]);
    assert_eq!(active_name(&nav), "Main");
    assert_eq!(nav.inactivity_ticks(), 0);
}

#[test]
fn directional_commands_are_ignored_on_dashboard() {
    for cmd in [Command::Up, Command::Down, Command::Left, Command::Right] {
        let mut nav = navigator();
        let before = nav.position();
        assert_eq!(nav.apply(cmd), Outcome::Ignored);
        assert_eq!(nav.position(), before);
    }
}

#[test]
fn ascending_from_root_is_a_noop() {
    let mut nav = navigator();
    let before = nav.position();
    nav.apply(Command::Left);
    assert_eq!(nav.position(), before);
    assert_eq!(nav.tree().node(nav.tree().root()).parent(), None);
}

#[test]
fn activate_without_menu_stays_on_dashboard() {
    let mut nav = Navigator::new(MenuTree::new("Dash"), config());
    assert_eq!(nav.apply(Command::Activate), Outcome::Accepted);
    assert_eq!(nav.position(), (Mode::Dashboard, nav.tree().root()));
}

#[test]
fn any_press_on_dashboard_activates() {
    for button in Button::ALL {
        let mut nav = navigator();
        nav.apply_presses(ButtonMask(button.bit()));
        assert_eq!(nav.mode(), Mode::Menu);
        assert_eq!(active_name(&nav), "Main");
        // the opening press is not also used for navigation
        assert_eq!(selected(&nav), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Menu mode
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn activate_is_ignored_inside_menu() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    let before = nav.position();
    assert_eq!(nav.apply(Command::Activate), Outcome::Ignored);
    assert_eq!(nav.position(), before);
}

#[test]
fn up_and_down_wrap_after_len_commands() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    let len = nav.tree().node(nav.active()).children().len();
    assert_eq!(len, 3);

    for cmd in [Command::Up, Command::Down] {
        let start = selected(&nav);
        let mut visited = Vec::new();
        for _ in 0..len {
            nav.apply(cmd);
            visited.push(selected(&nav));
        }
        assert_eq!(selected(&nav), start);
        visited.sort_unstable();
        assert_eq!(visited, (0..len).collect::<Vec<_>>());
    }
}

#[test]
fn up_from_first_wraps_to_last() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.apply(Command::Up);
    assert_eq!(selected(&nav), 2);
    nav.apply(Command::Down);
    assert_eq!(selected(&nav), 0);
}

#[test]
fn wraparound_holds_for_every_child_count() {
    for count in 1..=crate::config::MAX_CHILDREN {
        let mut tree = MenuTree::new("Dash");
        let root = tree.root();
        let menu = tree.add_child(root, "Menu", NodeKind::MenuRoot).unwrap();
        for _ in 0..count {
            tree.add_item(menu, "x").unwrap();
        }
        let mut nav = Navigator::new(tree, config());
        nav.apply(Command::Activate);
        for cmd in [Command::Up, Command::Down] {
            for step in 1..=count {
                nav.apply(cmd);
                if step < count {
                    assert_ne!(selected(&nav), 0, "count={count} step={step}");
                }
            }
            assert_eq!(selected(&nav), 0, "count={count}");
        }
    }
}

#[test]
fn cursor_moves_on_childless_node_are_accepted_noops() {
    let mut tree = MenuTree::new("Dash");
    let root = tree.root();
    tree.add_child(root, "Empty", NodeKind::MenuRoot).unwrap();
    let mut nav = Navigator::new(tree, config());
    nav.apply(Command::Activate);
    nav.tick_inactivity();
    nav.tick_inactivity();

    assert_eq!(nav.apply(Command::Up), Outcome::Accepted);
    assert_eq!(nav.inactivity_ticks(), 0);
    assert_eq!(nav.apply(Command::Down), Outcome::Accepted);
    assert_eq!(nav.apply(Command::Right), Outcome::Accepted);
    assert_eq!(selected(&nav), 0);
}

#[test]
fn right_descends_only_into_branches() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.apply(Command::Down); // Settings, a leaf
    let before = nav.position();
    assert_eq!(nav.apply(Command::Right), Outcome::Accepted);
    assert_eq!(nav.position(), before);

    nav.apply(Command::Up); // Sensors
    assert_eq!(nav.apply(Command::Right), Outcome::Changed);
    assert_eq!(active_name(&nav), "Sensors");
}

#[test]
fn right_on_leaf_resets_the_timeout() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.apply(Command::Down); // Settings, a leaf
    nav.tick_inactivity();
    nav.tick_inactivity();
    assert_eq!(nav.inactivity_ticks(), 2);

    assert_eq!(nav.apply(Command::Right), Outcome::Accepted);
    assert_eq!(nav.inactivity_ticks(), 0);
    assert_eq!(active_name(&nav), "Main");
}

#[test]
fn nodes_remember_their_cursor() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.apply(Command::Right);
    nav.apply(Command::Down);
    assert_eq!(selected(&nav), 1);
    nav.apply(Command::Left);
    nav.apply(Command::Right);
    assert_eq!(active_name(&nav), "Sensors");
    assert_eq!(selected(&nav), 1);
}

#[test]
fn left_from_menu_head_returns_to_dashboard() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    assert_eq!(nav.apply(Command::Left), Outcome::Changed);
    assert_eq!(nav.position(), (Mode::Dashboard, nav.tree().root()));
}

#[test]
fn sensors_walkthrough_ends_on_dashboard() {
    let mut nav = navigator();

    nav.apply(Command::Activate);
    assert_eq!(active_name(&nav), "Main");
    assert_eq!(selected(&nav), 0);

    nav.apply(Command::Right);
    assert_eq!(active_name(&nav), "Sensors");
    assert_eq!(selected(&nav), 0);

    nav.apply(Command::Down);
    nav.apply(Command::Down);
    let sensors = nav.tree().node(nav.active());
    assert_eq!(name(&nav, sensors.children()[sensors.selected()]), "Sensor 3");

    nav.apply(Command::Left);
    assert_eq!(active_name(&nav), "Main");
    assert_eq!(selected(&nav), 0);

    nav.apply(Command::Left);
    assert_eq!(nav.position(), (Mode::Dashboard, nav.tree().root()));
}

#[test]
fn only_the_root_returns_to_dashboard() {
    // a second menu head below the first is still just a menu
    let mut tree = MenuTree::new("Dash");
    let root = tree.root();
    let main = tree.add_child(root, "Main", NodeKind::MenuRoot).unwrap();
    let inner = tree.add_child(main, "Inner", NodeKind::MenuRoot).unwrap();
    tree.add_item(inner, "Leaf").unwrap();
    let mut nav = Navigator::new(tree, config());

    nav.apply(Command::Activate);
    nav.apply(Command::Right);
    assert_eq!(nav.position(), (Mode::Menu, inner));

    nav.apply(Command::Left);
    assert_eq!(nav.position(), (Mode::Menu, main));

    nav.apply(Command::Left);
    assert_eq!(nav.position(), (Mode::Dashboard, root));
}

#[test]
fn menu_presses_apply_in_button_order() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    // Right then Down: enter Sensors, then move to Sensor 2
    nav.apply_presses(ButtonMask(Button::Right.bit() | Button::Down.bit()));
    assert_eq!(active_name(&nav), "Sensors");
    assert_eq!(selected(&nav), 1);
}

#[test]
fn cursor_never_leaves_range() {
    let mut nav = navigator();
    let script = [
        Command::Activate,
        Command::Right,
        Command::Up,
        Command::Up,
        Command::Right,
        Command::Left,
        Command::Down,
        Command::Down,
        Command::Down,
        Command::Right,
        Command::Left,
        Command::Left,
        Command::Left,
        Command::Activate,
        Command::Down,
        Command::Right,
    ];
    for cmd in script.iter().cycle().take(200) {
        nav.apply(*cmd);
        let tree = nav.tree();
        assert!(tree.contains(nav.active()));
        let node = tree.node(nav.active());
        if node.has_children() {
            assert!(node.selected() < node.children().len());
        }
        if nav.mode() == Mode::Dashboard {
            assert_eq!(nav.active(), tree.root());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Inactivity timeout
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn timeout_fires_exactly_when_limit_is_exceeded() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.apply(Command::Right);

    for _ in 0..TIMEOUT {
        assert!(!nav.tick_inactivity());
        assert_eq!(nav.mode(), Mode::Menu);
    }
    assert!(nav.tick_inactivity());
    assert_eq!(nav.position(), (Mode::Dashboard, nav.tree().root()));
    assert!(nav.needs_redraw());
}

#[test]
fn commands_reset_the_timeout() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    for _ in 0..3 {
        for _ in 0..TIMEOUT {
            nav.tick_inactivity();
        }
        nav.apply(Command::Down);
    }
    assert_eq!(nav.mode(), Mode::Menu);
    assert_eq!(nav.inactivity_ticks(), 0);
}

#[test]
fn ignored_commands_do_not_reset_the_timeout() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    nav.tick_inactivity();
    nav.apply(Command::Activate);
    assert_eq!(nav.inactivity_ticks(), 1);
}

#[test]
fn timeout_does_not_run_on_dashboard() {
    let mut nav = navigator();
    for _ in 0..TIMEOUT * 3 {
        assert!(!nav.tick_inactivity());
    }
    assert_eq!(nav.inactivity_ticks(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Redraw requests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn finish_render_clears_matching_ticket_only() {
    let mut nav = navigator();
    let (view, ticket) = nav.take_view().unwrap();
    assert!(matches!(view, View::Dashboard { .. }));

    // a producer asks again while the frame is being drawn
    nav.request_redraw();
    nav.finish_render(ticket);
    assert!(nav.needs_redraw());

    let (_, ticket) = nav.take_view().unwrap();
    nav.finish_render(ticket);
    assert!(!nav.needs_redraw());
    assert!(nav.take_view().is_none());
}

#[test]
fn every_state_change_requests_redraw() {
    let mut nav = navigator();
    let (_, t) = nav.take_view().unwrap();
    nav.finish_render(t);

    for cmd in [Command::Activate, Command::Down, Command::Up, Command::Right, Command::Left] {
        assert_eq!(nav.apply(cmd), Outcome::Changed);
        assert!(nav.needs_redraw(), "{cmd:?}");
        let (_, t) = nav.take_view().unwrap();
        nav.finish_render(t);
    }

    // accepted no-op: leaf under the cursor
    nav.apply(Command::Down);
    let (_, t) = nav.take_view().unwrap();
    nav.finish_render(t);
    assert_eq!(nav.apply(Command::Right), Outcome::Accepted);
    assert!(!nav.needs_redraw());
}

#[test]
fn observed_change_beyond_tolerance_requests_redraw() {
    let mut nav = navigator();
    let (_, t) = nav.take_view().unwrap();
    nav.finish_render(t);

    let mut adc = Adc([0; 16]);
    adc.0[crate::config::THROTTLE_PIN as usize] = 3;
    assert!(!nav.refresh_observed(&mut adc));
    assert!(!nav.needs_redraw());

    adc.0[crate::config::THROTTLE_PIN as usize] = 4;
    assert!(nav.refresh_observed(&mut adc));
    assert!(nav.needs_redraw());
    assert_eq!(nav.tree().node(nav.tree().root()).observed()[0].last, 4);

    // falling by more than the tolerance counts too
    let (_, t) = nav.take_view().unwrap();
    nav.finish_render(t);
    adc.0[crate::config::THROTTLE_PIN as usize] = 0;
    assert!(nav.refresh_observed(&mut adc));
}

#[test]
fn only_the_active_node_is_refreshed() {
    let mut nav = navigator();
    nav.apply(Command::Activate);
    let (_, t) = nav.take_view().unwrap();
    nav.finish_render(t);

    // Main observes nothing; the dashboard's throttle change is not seen
    let mut adc = Adc([1000; 16]);
    assert!(!nav.refresh_observed(&mut adc));
    assert_eq!(nav.tree().node(nav.tree().root()).observed()[0].last, 0);
}
