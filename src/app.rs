use color_eyre::Result;
use crossterm::event::KeyCode;
use menu_selector::config::Config;
use menu_selector::graphics::{BitmapFont, FontFace, TextRenderer};
use menu_selector::sound::ToneSound;
use menu_selector::{InputEvent, Menu, NoSound, SelectionEvent, SoundPlayer};
use std::cell::RefCell;
use std::rc::Rc;

/// Demo state: one menu built from the configured selectors
pub struct App {
    pub menu: Menu,
    pub status: Rc<RefCell<String>>,
    pub should_quit: bool,
    close_key: KeyCode,
}

impl App {
    pub fn new(config: &Config, font: FontFace, size: (u32, u32)) -> Result<Self> {
        let status = Rc::new(RefCell::new(String::from(
            "Arrows change values, Enter confirms, Esc quits",
        )));
        let menu = build_menu(config, font, size, &status)?;
        Ok(Self {
            menu,
            status,
            should_quit: false,
            close_key: config.controls.key_close,
        })
    }

    /// Keeps the menu surface matched to the drawing area
    pub fn fit(&mut self, width: u32, height: u32) {
        if self.menu.context().window_size() != (width, height) {
            tracing::debug!(width, height, "Resizing menu surface");
            self.menu.resize(width, height);
        }
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) {
        if events.is_empty() {
            return;
        }
        self.menu.update(events);
    }

    #[must_use]
    pub fn menu_close_key(&self) -> KeyCode {
        self.close_key
    }

    #[must_use]
    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }
}

fn sound_player(config: &Config) -> Rc<dyn SoundPlayer> {
    if !config.sound.enabled {
        return Rc::new(NoSound);
    }
    match ToneSound::try_new(config.sound.volume) {
        Ok(sound) => Rc::new(sound),
        Err(err) => {
            tracing::warn!(error = %err, "No audio output, sound cues disabled");
            Rc::new(NoSound)
        }
    }
}

/// Builds the menu with one selector per `[[selectors]]` entry
pub fn build_menu(
    config: &Config,
    font: FontFace,
    size: (u32, u32),
    status: &Rc<RefCell<String>>,
) -> Result<Menu> {
    let font: Rc<dyn TextRenderer> = Rc::new(BitmapFont::new(font));
    let sound = sound_player(config);
    let mut menu = Menu::new(size.0, size.1).with_controls(config.controls.clone());

    for entry in &config.selectors {
        let on_change = Rc::clone(status);
        let on_return = Rc::clone(status);
        let selector = entry
            .builder(config)?
            .font(Rc::clone(&font))
            .sound(Rc::clone(&sound))
            .on_change(move |event: &SelectionEvent<'_, String>| {
                *on_change.borrow_mut() = describe("Changed", event);
            })
            .on_return(move |event: &SelectionEvent<'_, String>| {
                *on_return.borrow_mut() = describe("Confirmed", event);
            })
            .build()?;
        menu.add_widget(Box::new(selector));
    }

    tracing::info!(selectors = config.selectors.len(), "Menu built");
    Ok(menu)
}

fn describe(action: &str, event: &SelectionEvent<'_, String>) -> String {
    let payload = event.payload().join(", ");
    if payload.is_empty() {
        format!("{action} {}: {}", event.widget_id, event.element.label)
    } else {
        format!(
            "{action} {}: {} ({payload})",
            event.widget_id, event.element.label
        )
    }
}
