use crate::geometry::Point;
use crate::slider::{
    self, CircleCenter, Handle, HandleGesture, HandleIcons, LatestValue, SliderStyle,
    SliderValue, UpdateCallback,
};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

struct Appearance {
    style: SliderStyle,
    icons: HandleIcons,
}

/// GTK host for the slider: a drawing area with one drag recognizer per
/// handle. The owner keeps the authoritative value and pushes it back with
/// [`CircularSlider::set_value`] after every update.
pub struct CircularSlider {
    area: gtk::DrawingArea,
    appearance: Rc<RefCell<Appearance>>,
    value: LatestValue,
    center: CircleCenter,
}

impl CircularSlider {
    pub fn new(
        style: SliderStyle,
        value: SliderValue,
        icons: HandleIcons,
        on_update: impl Fn(SliderValue) + 'static,
    ) -> Self {
        let slider = Self {
            area: gtk::DrawingArea::new(),
            appearance: Rc::new(RefCell::new(Appearance { style, icons })),
            value: LatestValue::new(value),
            center: CircleCenter::default(),
        };
        slider.area.add_css_class("circular-slider");
        slider.apply_size();
        slider.connect_draw();
        slider.connect_layout();

        let on_update: UpdateCallback = Rc::new(on_update);
        for handle in Handle::iter() {
            slider.connect_handle(handle, on_update.clone());
        }
        slider
    }

    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    pub fn value(&self) -> SliderValue {
        self.value.get()
    }

    pub fn set_value(&self, value: SliderValue) {
        self.value.set(value);
        self.area.queue_draw();
    }

    pub fn set_style(&self, style: SliderStyle) {
        self.appearance.borrow_mut().style = style;
        self.apply_size();
        self.area.queue_draw();
    }

    pub fn set_icons(&self, icons: HandleIcons) {
        self.appearance.borrow_mut().icons = icons;
        self.area.queue_draw();
    }

    fn apply_size(&self) {
        let side = self.appearance.borrow().style.container_width().ceil() as i32;
        self.area.set_content_width(side);
        self.area.set_content_height(side);
    }

    fn connect_draw(&self) {
        let appearance = self.appearance.clone();
        let value = self.value.clone();
        self.area.set_draw_func(move |_, cr, _, _| {
            let appearance = appearance.borrow();
            if let Err(e) = slider::draw(cr, &appearance.style, value.get(), &appearance.icons) {
                log::error!("Drawing error: {}", e);
            }
        });
    }

    fn connect_layout(&self) {
        let appearance = self.appearance.clone();
        let center = self.center.clone();
        self.area.connect_resize(move |area, _, _| {
            let width = appearance.borrow().style.container_width();
            center.refresh(measure_origin(area), width);
        });
    }

    fn connect_handle(&self, handle: Handle, on_update: UpdateCallback) {
        let gesture = Rc::new(RefCell::new(HandleGesture::new(
            handle,
            self.value.clone(),
            self.center.clone(),
            on_update,
        )));
        let drag = gtk::GestureDrag::new();

        {
            let gesture = gesture.clone();
            let appearance = self.appearance.clone();
            let value = self.value.clone();
            drag.connect_drag_begin(move |drag, x, y| {
                let appearance = appearance.borrow();
                let local = Point::new(x, y);
                if slider::hit_handle(&appearance.style, value.get(), local) != Some(handle) {
                    drag.set_state(gtk::EventSequenceState::Denied);
                    return;
                }
                drag.set_state(gtk::EventSequenceState::Claimed);

                let Some(area) = drag.widget() else { return };
                let origin = measure_origin(&area);
                let Some(press) = origin.map(|o| local.offset(o.x, o.y)) else {
                    return;
                };
                gesture
                    .borrow_mut()
                    .grant(press, origin, appearance.style.container_width());
            });
        }

        {
            let gesture = gesture.clone();
            drag.connect_drag_update(move |drag, dx, dy| {
                let pointer = drag
                    .start_point()
                    .zip(drag.widget().and_then(|area| measure_origin(&area)))
                    .map(|((sx, sy), o)| Point::new(o.x + sx + dx, o.y + sy + dy));
                if let Some(pointer) = pointer {
                    gesture.borrow_mut().motion(pointer);
                }
            });
        }

        {
            let gesture = gesture.clone();
            drag.connect_drag_end(move |_, _, _| {
                gesture.borrow_mut().release();
            });
        }

        drag.connect_cancel(move |_, _| gesture.borrow_mut().cancel());

        self.area.add_controller(drag);
    }
}

/// Top-left corner of `widget` in its root's coordinates. `None` until the
/// widget is part of a realized hierarchy.
fn measure_origin(widget: &impl IsA<gtk::Widget>) -> Option<Point> {
    let root = widget.root()?;
    widget
        .compute_point(&root, &gtk::graphene::Point::zero())
        .map(|p| Point::new(f64::from(p.x()), f64::from(p.y())))
}
