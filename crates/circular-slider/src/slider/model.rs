use super::{Handle, SliderStyle, SliderValue, TAP_SLOP};
use crate::geometry::{Point, pointer_angle};
use std::cell::Cell;
use std::rc::Rc;

pub type UpdateCallback = Rc<dyn Fn(SliderValue)>;

/// Most recent value pushed by the owner. Gesture handlers read through this
/// holder instead of a copy captured when they were registered.
#[derive(Debug, Clone, Default)]
pub struct LatestValue(Rc<Cell<SliderValue>>);

impl LatestValue {
    pub fn new(value: SliderValue) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> SliderValue {
        self.0.get()
    }

    pub fn set(&self, value: SliderValue) {
        self.0.set(value);
    }
}

/// Cached on-screen center of the slider circle, shared by both handles.
#[derive(Debug, Clone, Default)]
pub struct CircleCenter(Rc<Cell<Point>>);

impl CircleCenter {
    pub fn get(&self) -> Point {
        self.0.get()
    }

    /// Recomputes the center from the measured top-left corner of the
    /// container. Returns false and keeps the previous center when the
    /// measurement failed.
    pub fn refresh(&self, origin: Option<Point>, container_width: f64) -> bool {
        let Some(origin) = origin else {
            log::debug!("Layout not measurable yet, keeping circle center");
            return false;
        };
        let half = container_width / 2.0;
        self.0.set(origin.offset(half, half));
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { press: Point, snapshot: SliderValue },
    Dragging { snapshot: SliderValue },
}

/// Press/drag/tap state machine of a single handle.
///
/// Every pointer position is in the same coordinate space as the
/// [`CircleCenter`].
pub struct HandleGesture {
    handle: Handle,
    value: LatestValue,
    center: CircleCenter,
    on_update: UpdateCallback,
    phase: Phase,
}

impl HandleGesture {
    pub fn new(
        handle: Handle,
        value: LatestValue,
        center: CircleCenter,
        on_update: UpdateCallback,
    ) -> Self {
        Self {
            handle,
            value,
            center,
            on_update,
            phase: Phase::Idle,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn grant(&mut self, press: Point, origin: Option<Point>, container_width: f64) {
        self.center.refresh(origin, container_width);
        let snapshot = self.value.get();
        log::debug!("{} handle pressed at {:?}", self.handle, snapshot);
        self.phase = Phase::Pressed { press, snapshot };
    }

    pub fn motion(&mut self, pointer: Point) -> Option<SliderValue> {
        let snapshot = match self.phase {
            Phase::Idle => return None,
            Phase::Pressed { press, .. } if press.distance(pointer) < TAP_SLOP => return None,
            Phase::Pressed { snapshot, .. } | Phase::Dragging { snapshot } => snapshot,
        };
        self.phase = Phase::Dragging { snapshot };

        let angle = pointer_angle(self.center.get(), pointer);
        let updated = snapshot.dragged(self.handle, angle);
        (self.on_update)(updated);
        Some(updated)
    }

    /// Ends the gesture. A press that never turned into a drag is a tap.
    pub fn release(&mut self) -> Option<SliderValue> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        if !matches!(phase, Phase::Pressed { .. }) {
            return None;
        }

        let updated = self.value.get().tapped(self.handle);
        log::debug!("{} handle tapped", self.handle);
        (self.on_update)(updated);
        Some(updated)
    }

    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("{} handle gesture cancelled", self.handle);
        }
        self.phase = Phase::Idle;
    }
}

/// Finds the handle under `point`, given relative to the container's corner.
/// The start handle is drawn last, so it wins where both overlap.
pub fn hit_handle(style: &SliderStyle, value: SliderValue, point: Point) -> Option<Handle> {
    let offset = style.center_offset();
    let local = point.offset(-offset, -offset);

    [Handle::Start, Handle::Stop]
        .into_iter()
        .find(|&h| style.handle_position(h, value).distance(local) <= style.handle_radius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    struct Harness {
        value: LatestValue,
        center: CircleCenter,
        updates: Rc<RefCell<Vec<SliderValue>>>,
    }

    impl Harness {
        fn new(value: SliderValue) -> Self {
            Self {
                value: LatestValue::new(value),
                center: CircleCenter::default(),
                updates: Rc::default(),
            }
        }

        fn gesture(&self, handle: Handle) -> HandleGesture {
            let updates = self.updates.clone();
            HandleGesture::new(
                handle,
                self.value.clone(),
                self.center.clone(),
                Rc::new(move |v| updates.borrow_mut().push(v)),
            )
        }

        fn updates(&self) -> Vec<SliderValue> {
            self.updates.borrow().clone()
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    const ORIGIN: Point = Point { x: 10.0, y: 20.0 };
    const WIDTH: f64 = 332.0;
    // ORIGIN + WIDTH / 2
    const CENTER: Point = Point { x: 176.0, y: 186.0 };

    #[test]
    fn test_center_refresh() {
        let center = CircleCenter::default();
        assert!(center.refresh(Some(ORIGIN), WIDTH));
        assert_eq!(center.get(), CENTER);

        assert!(!center.refresh(None, WIDTH));
        assert_eq!(center.get(), CENTER);
    }

    #[test]
    fn test_drag_start_handle() {
        let h = Harness::new(SliderValue::new(0.0, PI));
        let mut gesture = h.gesture(Handle::Start);

        gesture.grant(CENTER.offset(0.0, -145.0), Some(ORIGIN), WIDTH);
        let updated = gesture.motion(CENTER.offset(100.0, 0.0)).unwrap();

        assert_close(updated.start_angle, PI / 2.0);
        assert_close(updated.angle_length, PI / 2.0);
        assert_eq!(h.updates(), vec![updated]);
    }

    #[test]
    fn test_drag_stop_handle() {
        let h = Harness::new(SliderValue::new(0.5, 1.0));
        let mut gesture = h.gesture(Handle::Stop);

        gesture.grant(CENTER, Some(ORIGIN), WIDTH);
        for pointer in [
            CENTER.offset(0.0, 80.0),
            CENTER.offset(-80.0, 0.0),
            CENTER.offset(0.0, -80.0),
        ] {
            let updated = gesture.motion(pointer).unwrap();
            assert_eq!(updated.start_angle, 0.5);
        }

        let last = *h.updates().last().unwrap();
        assert_close(last.angle_length, 2.0 * PI - 0.5);
        assert_eq!(gesture.release(), None);
        assert_eq!(h.updates().len(), 3);
    }

    #[test]
    fn test_drag_uses_snapshot_from_grant() {
        let h = Harness::new(SliderValue::new(1.0, 1.0));
        let mut gesture = h.gesture(Handle::Stop);

        gesture.grant(CENTER, Some(ORIGIN), WIDTH);
        h.value.set(SliderValue::new(2.0, 1.0));
        let updated = gesture.motion(CENTER.offset(0.0, 80.0)).unwrap();

        assert_eq!(updated.start_angle, 1.0);
        assert_close(updated.angle_length, PI - 1.0);
    }

    #[test]
    fn test_small_movement_is_a_tap() {
        let h = Harness::new(SliderValue::new(0.0, PI));
        let mut gesture = h.gesture(Handle::Stop);

        let press = CENTER.offset(0.0, 145.0);
        gesture.grant(press, Some(ORIGIN), WIDTH);
        assert_eq!(gesture.motion(press.offset(2.0, 1.0)), None);
        assert!(h.updates().is_empty());

        let tapped = gesture.release().unwrap();
        assert_eq!(tapped.start_angle, 0.0);
        assert_close(tapped.angle_length, 3.0 * PI / 2.0);
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_tap_reads_latest_value() {
        let h = Harness::new(SliderValue::new(0.0, 1.0));
        let mut gesture = h.gesture(Handle::Start);

        gesture.grant(CENTER, Some(ORIGIN), WIDTH);
        h.value.set(SliderValue::new(PI / 2.0, PI / 2.0));
        let tapped = gesture.release().unwrap();

        assert_close(tapped.start_angle, 0.0);
        assert_close(tapped.angle_length, PI);
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let h = Harness::new(SliderValue::new(0.0, PI));
        let mut gesture = h.gesture(Handle::Start);

        gesture.grant(CENTER, Some(ORIGIN), WIDTH);
        gesture.cancel();

        assert_eq!(gesture.motion(CENTER.offset(50.0, 50.0)), None);
        assert_eq!(gesture.release(), None);
        assert!(h.updates().is_empty());
    }

    #[test]
    fn test_handles_share_center() {
        let h = Harness::new(SliderValue::new(0.0, PI));
        let mut start = h.gesture(Handle::Start);
        let mut stop = h.gesture(Handle::Stop);

        start.grant(CENTER, Some(ORIGIN), WIDTH);
        start.cancel();

        // unmeasurable layout: stop handle reuses the center cached by start
        stop.grant(CENTER, None, WIDTH);
        let updated = stop.motion(CENTER.offset(-60.0, 0.0)).unwrap();
        assert_close(updated.angle_length, 3.0 * PI / 2.0);
    }

    #[test]
    fn test_hit_handle() {
        let style = SliderStyle::default();
        let value = SliderValue::new(0.0, PI);
        let offset = style.center_offset();

        let at = |x: f64, y: f64| hit_handle(&style, value, Point::new(offset + x, offset + y));

        assert_eq!(at(0.0, -145.0), Some(Handle::Start));
        assert_eq!(at(10.0, -140.0), Some(Handle::Start));
        assert_eq!(at(0.0, 145.0), Some(Handle::Stop));
        assert_eq!(at(145.0, 0.0), None);
        assert_eq!(at(0.0, 0.0), None);

        let collapsed = SliderValue::new(1.0, 0.0);
        let start = style.handle_position(Handle::Start, collapsed);
        let point = start.offset(offset, offset);
        assert_eq!(hit_handle(&style, collapsed, point), Some(Handle::Start));
    }
}
