use super::*;
use crate::input::GestureKind;
use crate::test_helpers::TestHost;

const PIECE: Rect = Rect::new(0.0, 0.0, 50.0, 50.0);
const TARGET: Vector2 = Vector2::new(200.0, 0.0);

fn snap_drag() -> SnapDrag<TestHost> {
    SnapDrag::new(
        |_: &TestHost| 10.0,
        |_: &TestHost| Some(SnapTarget { point: TARGET, radius: 20.0 }),
        |host: &mut TestHost, _| host.log.push("snap".to_owned()),
    )
}

fn location(host: &TestHost, id: ElementId) -> Option<Vector2> {
    host.rect(id).map(|rect| rect.location)
}

// =============================================================
// Tap / click
// =============================================================

#[test]
fn click_fires_on_release_inside() {
    let mut host = TestHost::new();
    host.add(PIECE, click(|host: &mut TestHost| host.log.push("click".to_owned())));
    host.press(10.0, 10.0);
    host.release(10.0, 10.0);
    assert_eq!(host.log, vec!["click"]);
}

#[test]
fn click_does_not_fire_after_leaving() {
    let mut host = TestHost::new();
    host.add(PIECE, click(|host: &mut TestHost| host.log.push("click".to_owned())));
    host.press(10.0, 10.0);
    host.drag(60.0, 10.0);
    host.release(10.0, 10.0);
    assert!(host.log.is_empty());
}

// =============================================================
// Press / release
// =============================================================

fn press_release_logger() -> PressHandler<TestHost> {
    press_release(
        |host: &mut TestHost| host.log.push("down".to_owned()),
        |host: &mut TestHost| host.log.push("up".to_owned()),
    )
}

#[test]
fn press_release_fires_press_immediately_and_release_on_release() {
    let mut host = TestHost::new();
    host.add(PIECE, press_release_logger());
    host.press(10.0, 10.0);
    assert_eq!(host.log, vec!["down"]);
    host.release(10.0, 10.0);
    assert_eq!(host.log, vec!["down", "up"]);
}

#[test]
fn press_release_fires_release_on_leave() {
    let mut host = TestHost::new();
    host.add(PIECE, press_release_logger());
    host.press(10.0, 10.0);
    host.drag(100.0, 10.0);
    assert_eq!(host.log, vec!["down", "up"]);
    assert_eq!(host.scene.gesture(), GestureKind::Idle);
}

#[test]
fn press_release_declines_on_non_hit_testable_element() {
    let mut host = TestHost::new();
    let handler = press_release_logger();
    let id = host.scene.add_element(Element::new(PIECE));
    let transition = handler(&mut host, id, Vector2::new(10.0, 10.0));
    assert!(matches!(transition, Transition::Stay));
    assert!(host.log.is_empty());
}

// =============================================================
// Hover
// =============================================================

#[test]
fn hover_reports_elements_under_pointer() {
    let mut host = TestHost::new();
    let handler = hover(
        |host: &mut TestHost, element: ElementId| host.log.push(format!("{element:?}")),
        |host: &mut TestHost| host.log.push("done".to_owned()),
    );
    let a = host.add(PIECE, Rc::clone(&handler));
    let b = host.add(Rect::new(100.0, 0.0, 50.0, 50.0), handler);
    host.press(10.0, 10.0);
    host.drag(110.0, 10.0);
    host.drag(120.0, 10.0);
    host.release(120.0, 10.0);
    assert_eq!(host.log, vec![format!("{a:?}"), format!("{b:?}"), format!("{b:?}"), "done".to_owned()]);
}

// =============================================================
// Follow parent
// =============================================================

#[test]
fn follow_parent_keeps_child_offsets() {
    let mut host = TestHost::new();
    let parent = host.scene.add_element(Element::new(PIECE).hit_testable(true));
    let child = host.scene.add_element(Element::new(Rect::new(10.0, 10.0, 5.0, 5.0)));
    let follow = follow_parent(&host.scene, parent, &[child]);

    if let Some(element) = host.scene.element_mut(parent) {
        element.set_location(Vector2::new(50.0, 20.0));
    }
    follow(&mut host);
    assert_eq!(location(&host, child), Some(Vector2::new(60.0, 30.0)));
}

#[test]
fn follow_parent_with_removed_parent_is_a_no_op() {
    let mut host = TestHost::new();
    let parent = host.scene.add_element(Element::new(PIECE));
    let child = host.scene.add_element(Element::new(Rect::new(10.0, 10.0, 5.0, 5.0)));
    let follow = follow_parent(&host.scene, parent, &[child]);
    host.scene.remove_element(parent);
    follow(&mut host);
    assert_eq!(location(&host, child), Some(Vector2::new(10.0, 10.0)));
}

// =============================================================
// Anchor-and-snap drag
// =============================================================

#[test]
fn snap_drag_dead_zone_keeps_start_rect() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    host.drag(30.0, 25.0);
    assert_eq!(host.rect(id), Some(PIECE));
    host.drag(25.0, 34.0);
    assert_eq!(host.rect(id), Some(PIECE));
    assert_eq!(host.scene.gesture(), GestureKind::Drag);
}

#[test]
fn snap_drag_leaving_dead_zone_unanchors_for_good() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    host.drag(35.0, 25.0);
    assert_eq!(location(&host, id), Some(Vector2::new(10.0, 0.0)));
    host.drag(27.0, 25.0);
    assert_eq!(location(&host, id), Some(Vector2::new(2.0, 0.0)));
}

#[test]
fn snap_drag_locks_onto_target() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    host.drag(100.0, 25.0);
    host.drag(205.0, 25.0);
    assert_eq!(location(&host, id), Some(TARGET));
    assert_eq!(host.log, vec!["snap"]);
    assert_eq!(host.scene.gesture(), GestureKind::Idle);

    host.drag(300.0, 300.0);
    host.release(300.0, 300.0);
    assert_eq!(location(&host, id), Some(TARGET));
}

#[test]
fn snapped_element_refuses_new_gestures() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    host.drag(225.0, 25.0);
    host.release(225.0, 25.0);

    host.press(210.0, 10.0);
    assert_eq!(host.scene.gesture(), GestureKind::Idle);
    host.drag(400.0, 400.0);
    assert_eq!(location(&host, id), Some(TARGET));
}

#[test]
fn snap_drag_release_in_dead_zone_clicks() {
    let mut host = TestHost::new();
    let handler = snap_drag()
        .on_click(|host: &mut TestHost| host.log.push("click".to_owned()))
        .on_release(|host: &mut TestHost, anchored: bool| {
            host.log.push(format!("release anchored={anchored}"));
            true
        })
        .into_handler();
    host.add(PIECE, handler);
    host.press(25.0, 25.0);
    host.drag(28.0, 25.0);
    host.release(28.0, 25.0);
    assert_eq!(host.log, vec!["click", "release anchored=true"]);
}

#[test]
fn snap_drag_release_after_moving_does_not_click() {
    let mut host = TestHost::new();
    let handler = snap_drag()
        .on_click(|host: &mut TestHost| host.log.push("click".to_owned()))
        .on_release(|host: &mut TestHost, anchored: bool| {
            host.log.push(format!("release anchored={anchored}"));
            true
        })
        .into_handler();
    host.add(PIECE, handler);
    host.press(25.0, 25.0);
    host.drag(60.0, 25.0);
    host.release(60.0, 25.0);
    assert_eq!(host.log, vec!["release anchored=false"]);
}

#[test]
fn missing_on_release_drops_anchor_for_next_gesture() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    host.release(25.0, 25.0);

    host.press(25.0, 25.0);
    host.drag(27.0, 25.0);
    assert_eq!(location(&host, id), Some(Vector2::new(2.0, 0.0)));
}

#[test]
fn on_release_can_reanchor_next_gesture() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().on_release(|_: &mut TestHost, _| true).into_handler());
    host.press(25.0, 25.0);
    host.drag(60.0, 25.0);
    host.release(60.0, 25.0);
    let moved = host.rect(id).unwrap_or(PIECE);

    host.press(60.0, 25.0);
    host.drag(63.0, 25.0);
    assert_eq!(host.rect(id), Some(moved));
}

#[test]
fn can_drag_is_checked_on_first_drag() {
    let mut host = TestHost::new();
    let handler = snap_drag().can_drag(|host: &TestHost, _| host.allow).into_handler();
    let id = host.add(PIECE, handler);

    host.press(25.0, 25.0);
    assert_eq!(host.scene.gesture(), GestureKind::Drag);
    host.allow = false;
    host.drag(80.0, 25.0);
    assert_eq!(host.scene.gesture(), GestureKind::Idle);
    assert_eq!(host.rect(id), Some(PIECE));
}

#[test]
fn start_rect_is_captured_on_first_drag() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().into_handler());
    host.press(25.0, 25.0);
    if let Some(element) = host.scene.element_mut(id) {
        element.set_location(Vector2::new(0.0, 100.0));
    }
    host.drag(45.0, 25.0);
    assert_eq!(location(&host, id), Some(Vector2::new(20.0, 100.0)));
}

#[test]
fn coerce_location_has_final_say() {
    let mut host = TestHost::new();
    let handler = snap_drag()
        .coerce_location(|host: &TestHost, rect: Rect| rect.restricted_location(host.scene.bounds()))
        .into_handler();
    let id = host.add(PIECE, handler);
    host.press(25.0, 25.0);
    host.drag(-100.0, 25.0);
    assert_eq!(location(&host, id), Some(Vector2::ZERO));
}

#[test]
fn on_move_runs_after_each_committed_drag() {
    let mut host = TestHost::new();
    let parent = host.scene.add_element(Element::new(PIECE).hit_testable(true));
    let child = host.scene.add_element(Element::new(Rect::new(10.0, 10.0, 5.0, 5.0)));
    let handler = snap_drag().on_move(follow_parent(&host.scene, parent, &[child])).into_handler();
    if let Some(element) = host.scene.element_mut(parent) {
        element.set_press_handler(Some(handler));
    }

    host.press(25.0, 25.0);
    host.drag(75.0, 45.0);
    assert_eq!(location(&host, child), Some(Vector2::new(60.0, 30.0)));
}

#[test]
fn snap_drag_ends_when_element_is_removed() {
    let mut host = TestHost::new();
    let id = host.add(PIECE, snap_drag().on_move(|host: &mut TestHost| host.log.push("moved".to_owned())).into_handler());
    host.press(25.0, 25.0);
    host.drag(60.0, 25.0);
    host.scene.remove_element(id);

    host.drag(205.0, 25.0);
    assert_eq!(host.log, vec!["moved"]);
    assert_eq!(host.scene.gesture(), GestureKind::Idle);
}
