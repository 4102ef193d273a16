use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme;
use crate::schedule::Schedule;
use circular_slider::{CircularSlider, ClockFormat, SliderValue};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;

/// Owns the slider value; the widget only reports changes through
/// [`AppMsg::Update`] and receives the accepted value back.
pub struct AppModel {
    value: SliderValue,
    format: ClockFormat,
    slider: CircularSlider,
}

impl AppModel {
    fn summary(&self) -> String {
        Schedule::from_value(self.value, self.format).to_string()
    }
}

#[derive(Debug)]
pub enum AppMsg {
    Update(SliderValue),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Bedtime"),
            set_resizable: false,
            add_css_class: "bedtime-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 16,
                set_margin_all: 24,

                #[local_ref]
                slider_area -> gtk::DrawingArea {
                    set_halign: gtk::Align::Center,
                },

                gtk::Label {
                    add_css_class: "bedtime-summary",
                    #[watch]
                    set_label: &model.summary(),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let input = sender.input_sender().clone();
        let slider = CircularSlider::new(
            config.slider.clone(),
            config.initial,
            config.icons.load(),
            move |value| input.emit(AppMsg::Update(value)),
        );

        let model = AppModel {
            value: config.initial,
            format: config.slider.clock_format,
            slider,
        };

        let slider_area = model.slider.widget();
        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Update(value) => {
                self.value = value;
                self.slider.set_value(value);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.format = new_config.slider.clock_format;
                    self.slider.set_icons(new_config.icons.load());
                    self.slider.set_style(new_config.slider);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
