//! Selector widget: cycles left and right through a fixed list of options.
//!
//! Each option is an [`Element`] with a display label and an arbitrary
//! payload. Moving the selection fires the change callback with the newly
//! selected element; confirming fires the return callback. Both receive a
//! [`SelectionEvent`] whose payload slice carries the element's values.

mod dispatch;
mod render;

pub use dispatch::{ClickZone, click_zone};
pub use render::{FancyLayout, arrow_left_points, arrow_right_points};

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::controls::Controls;
use crate::error::SelectorError;
use crate::events::InputEvent;
use crate::graphics::{Color, Surface, TextRenderer};
use crate::sound::SoundPlayer;

use super::{RenderOutcome, SelectCallback, Widget, WidgetBase};

/// One option: the label shown to the user plus values handed to callbacks
#[derive(Debug, Clone, PartialEq)]
pub struct Element<T> {
    pub label: String,
    pub payload: Vec<T>,
}

impl<T> Element<T> {
    pub fn new(label: impl Into<String>, payload: Vec<T>) -> Self {
        Self {
            label: label.into(),
            payload,
        }
    }

    /// Element with no payload values
    pub fn without_payload(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

impl Element<String> {
    /// Builds an element from a raw row whose first entry is the label
    pub fn from_row(index: usize, row: Vec<String>) -> Result<Self, SelectorError> {
        let mut values = row.into_iter();
        let label = values.next().ok_or(SelectorError::EmptyRow { index })?;
        Ok(Self::new(label, values.collect()))
    }
}

/// Checks the element list shared by construction and updates
pub fn check_elements<T>(elements: &[Element<T>]) -> Result<(), SelectorError> {
    if elements.is_empty() {
        return Err(SelectorError::EmptyElements);
    }
    Ok(())
}

/// Visual variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorStyle {
    /// Inline `Title< Option >` text
    #[default]
    Classic,
    /// Option drawn in a box between two arrows
    Fancy,
}

/// Settings of the fancy style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FancyStyle {
    pub arrow_color: Color,
    /// Arrow margins `(left, right, vertical)`
    pub arrow_margin: [i32; 3],
    pub bgcolor: Color,
    pub bordercolor: Color,
    pub borderwidth: i32,
    /// Box inflate `(x, y)`
    pub box_inflate: [i32; 2],
    /// Gap between the title and the box
    pub box_margin: i32,
}

impl Default for FancyStyle {
    fn default() -> Self {
        Self {
            arrow_color: Color::rgb(160, 160, 160),
            arrow_margin: [5, 5, 0],
            bgcolor: Color::rgb(180, 180, 180),
            bordercolor: Color::rgb(0, 0, 0),
            borderwidth: 1,
            box_inflate: [0, 0],
            box_margin: 25,
        }
    }
}

impl FancyStyle {
    pub fn validate(&self) -> Result<(), SelectorError> {
        let fields = [
            ("arrow margin left", self.arrow_margin[0]),
            ("arrow margin right", self.arrow_margin[1]),
            ("arrow margin vertical", self.arrow_margin[2]),
            ("border width", self.borderwidth),
            ("box inflate x", self.box_inflate[0]),
            ("box inflate y", self.box_inflate[1]),
            ("box margin", self.box_margin),
        ];
        match fields.into_iter().find(|(_, value)| *value < 0) {
            Some((field, value)) => Err(SelectorError::NegativeValue { field, value }),
            None => Ok(()),
        }
    }
}

/// Target of [`Selector::set_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorItem<'a> {
    /// First element whose label matches
    Label(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for SelectorItem<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

impl From<usize> for SelectorItem<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Context handed to change and return callbacks
#[derive(Debug)]
pub struct SelectionEvent<'a, T> {
    pub widget_id: &'a str,
    pub element: &'a Element<T>,
    pub index: usize,
}

impl<T> SelectionEvent<'_, T> {
    /// The element's values, label excluded
    #[must_use]
    pub fn payload(&self) -> &[T] {
        &self.element.payload
    }
}

pub type SelectorCallback<T> = Box<dyn FnMut(&SelectionEvent<'_, T>)>;

/// Builder collecting selector configuration before validation
pub struct SelectorBuilder<T> {
    title: String,
    elements: Vec<Element<T>>,
    id: String,
    default_index: usize,
    style: SelectorStyle,
    fancy: FancyStyle,
    readonly: bool,
    on_change: Option<SelectorCallback<T>>,
    on_return: Option<SelectorCallback<T>>,
    on_select: Option<SelectCallback>,
    font: Option<Rc<dyn TextRenderer>>,
    sound: Option<Rc<dyn SoundPlayer>>,
    controls: Option<Controls>,
}

impl<T: PartialEq> SelectorBuilder<T> {
    pub fn new(title: impl Into<String>, elements: Vec<Element<T>>) -> Self {
        Self {
            title: title.into(),
            elements,
            id: String::new(),
            default_index: 0,
            style: SelectorStyle::default(),
            fancy: FancyStyle::default(),
            readonly: false,
            on_change: None,
            on_return: None,
            on_select: None,
            font: None,
            sound: None,
            controls: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn default_index(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }

    #[must_use]
    pub fn style(mut self, style: SelectorStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn fancy(mut self, fancy: FancyStyle) -> Self {
        self.fancy = fancy;
        self
    }

    #[must_use]
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&SelectionEvent<'_, T>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_return(mut self, callback: impl FnMut(&SelectionEvent<'_, T>) + 'static) -> Self {
        self.on_return = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(bool, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn font(mut self, font: Rc<dyn TextRenderer>) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn sound(mut self, sound: Rc<dyn SoundPlayer>) -> Self {
        self.sound = Some(sound);
        self
    }

    #[must_use]
    pub fn controls(mut self, controls: Controls) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Validates the configuration and moves to the default element
    pub fn build(self) -> Result<Selector<T>, SelectorError> {
        check_elements(&self.elements)?;
        let len = self.elements.len();
        if self.default_index >= len {
            return Err(SelectorError::DefaultOutOfRange {
                default: self.default_index,
                len,
            });
        }
        self.fancy.validate()?;

        let mut base = WidgetBase::new(self.title, self.id);
        if let Some(font) = self.font {
            base.set_font(font);
        }
        if let Some(sound) = self.sound {
            base.set_sound(sound);
        }
        if let Some(controls) = self.controls {
            base.set_controls(controls);
        }
        if let Some(callback) = self.on_select {
            base.set_on_select(callback);
        }

        let mut selector = Selector {
            base,
            elements: self.elements,
            index: 0,
            default_index: 0,
            style: self.style,
            fancy: self.fancy,
            on_change: self.on_change,
            on_return: self.on_return,
            surface: None,
        };

        // Walk to the default so the change callback sees every step
        for _ in 0..self.default_index {
            selector.move_right();
        }
        selector.default_index = self.default_index;
        selector.base.set_readonly(self.readonly);
        Ok(selector)
    }
}

/// Widget cycling through a fixed list of labeled elements
pub struct Selector<T = String> {
    base: WidgetBase,
    elements: Vec<Element<T>>,
    index: usize,
    default_index: usize,
    style: SelectorStyle,
    fancy: FancyStyle,
    on_change: Option<SelectorCallback<T>>,
    on_return: Option<SelectorCallback<T>>,
    surface: Option<Surface>,
}

impl<T: PartialEq> Selector<T> {
    pub fn builder(title: impl Into<String>, elements: Vec<Element<T>>) -> SelectorBuilder<T> {
        SelectorBuilder::new(title, elements)
    }

    // `index < elements.len()` and `elements` is never empty
    #[allow(clippy::indexing_slicing)]
    fn current(&self) -> &Element<T> {
        &self.elements[self.index]
    }

    /// Currently selected index
    #[must_use]
    pub fn get_index(&self) -> usize {
        self.index
    }

    /// Currently selected element and its index
    #[must_use]
    pub fn get_value(&self) -> (&Element<T>, usize) {
        (self.current(), self.index)
    }

    #[must_use]
    pub fn elements(&self) -> &[Element<T>] {
        &self.elements
    }

    #[must_use]
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    #[must_use]
    pub fn style(&self) -> SelectorStyle {
        self.style
    }

    #[must_use]
    pub fn fancy_style(&self) -> &FancyStyle {
        &self.fancy
    }

    /// Width of the title in the current font, used to split click zones
    #[must_use]
    pub fn title_width(&self) -> i32 {
        self.base.font().text_width(self.base.title())
    }

    /// Selects an element by label or by index without firing callbacks.
    ///
    /// A label that matches no element yields [`SelectorError::NotFound`]
    /// and leaves the selection untouched.
    pub fn set_value<'a>(&mut self, item: impl Into<SelectorItem<'a>>) -> Result<(), SelectorError> {
        match item.into() {
            SelectorItem::Label(label) => {
                let index = self
                    .elements
                    .iter()
                    .position(|element| element.label == label)
                    .ok_or_else(|| SelectorError::NotFound(label.to_string()))?;
                self.index = index;
            }
            SelectorItem::Index(index) => {
                if index >= self.elements.len() {
                    return Err(SelectorError::IndexOutOfRange {
                        index,
                        len: self.elements.len(),
                    });
                }
                self.index = index;
            }
        }
        tracing::debug!(widget = self.base.id(), index = self.index, "Selector value set");
        Ok(())
    }

    /// Changes the index restored by [`Selector::reset_value`]
    pub fn set_default_value(&mut self, index: usize) -> Result<(), SelectorError> {
        if index >= self.elements.len() {
            return Err(SelectorError::DefaultOutOfRange {
                default: index,
                len: self.elements.len(),
            });
        }
        self.default_index = index;
        Ok(())
    }

    /// Replaces the element list.
    ///
    /// The selected element is looked up in the new list and kept selected
    /// if present. Otherwise an index past the end of the new list falls
    /// back to 0 (default included), and an index still in range is kept as
    /// is, now pointing at whichever element sits there.
    pub fn update_elements(&mut self, elements: Vec<Element<T>>) -> Result<(), SelectorError> {
        check_elements(&elements)?;
        let found = elements.iter().position(|element| element == self.current());
        self.elements = elements;
        match found {
            Some(index) => self.index = index,
            None if self.index >= self.elements.len() => {
                tracing::debug!(
                    widget = self.base.id(),
                    previous = self.index,
                    "Selected element gone, resetting selector to first element"
                );
                self.index = 0;
                self.default_index = 0;
            }
            None => {}
        }
        if self.default_index >= self.elements.len() {
            self.default_index = 0;
        }
        Ok(())
    }

    fn change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            #[allow(clippy::indexing_slicing)]
            let event = SelectionEvent {
                widget_id: self.base.id(),
                element: &self.elements[self.index],
                index: self.index,
            };
            callback(&event);
        }
    }

    fn apply(&mut self) {
        if let Some(callback) = self.on_return.as_mut() {
            #[allow(clippy::indexing_slicing)]
            let event = SelectionEvent {
                widget_id: self.base.id(),
                element: &self.elements[self.index],
                index: self.index,
            };
            callback(&event);
        }
    }

    fn move_left(&mut self) {
        if self.base.is_readonly() {
            return;
        }
        let len = self.elements.len();
        self.index = (self.index + len - 1) % len;
        tracing::debug!(widget = self.base.id(), index = self.index, "Selector moved left");
        self.change();
        self.base.sound().play_key_add();
    }

    fn move_right(&mut self) {
        if self.base.is_readonly() {
            return;
        }
        self.index = (self.index + 1) % self.elements.len();
        tracing::debug!(widget = self.base.id(), index = self.index, "Selector moved right");
        self.change();
        self.base.sound().play_key_add();
    }

    fn confirm(&mut self) {
        self.base.sound().play_open_menu();
        self.apply();
    }
}

impl<T: PartialEq> Widget for Selector<T> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn render(&mut self) -> RenderOutcome {
        self.render_surface()
    }

    fn update(&mut self, events: &[InputEvent]) -> bool {
        self.dispatch(events)
    }

    fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    fn reset_value(&mut self) {
        self.index = self.default_index;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Log, logged_builder, rows};
    use super::*;
    use proptest::prelude::*;

    fn selector(labels: &[&str]) -> Selector<i32> {
        Selector::builder("Mode", rows(labels)).build().unwrap()
    }

    #[test]
    fn test_build_rejects_empty_elements() {
        let result = Selector::<i32>::builder("Mode", Vec::new()).build();
        assert_eq!(result.err(), Some(SelectorError::EmptyElements));
    }

    #[test]
    fn test_build_rejects_default_out_of_range() {
        let result = Selector::builder("Mode", rows(&["a", "b"]))
            .default_index(2)
            .build();
        assert_eq!(
            result.err(),
            Some(SelectorError::DefaultOutOfRange { default: 2, len: 2 })
        );
    }

    #[test]
    fn test_build_rejects_negative_fancy_values() {
        let fancy = FancyStyle {
            box_inflate: [0, -2],
            ..FancyStyle::default()
        };
        let result = Selector::builder("Mode", rows(&["a"]))
            .style(SelectorStyle::Fancy)
            .fancy(fancy)
            .build();
        assert_eq!(
            result.err(),
            Some(SelectorError::NegativeValue {
                field: "box inflate y",
                value: -2
            })
        );
    }

    #[test]
    fn test_from_row() {
        let element = Element::from_row(0, vec!["Easy".into(), "1".into()]).unwrap();
        assert_eq!(element, Element::new("Easy", vec!["1".to_string()]));
        assert!(Element::<String>::without_payload("Off").payload.is_empty());
        assert_eq!(
            Element::from_row(3, Vec::new()),
            Err(SelectorError::EmptyRow { index: 3 })
        );
    }

    #[test]
    fn test_default_walks_right_firing_change() {
        let log = Log::default();
        let selector = logged_builder(&["a", "b", "c"], &log)
            .default_index(2)
            .build()
            .unwrap();
        assert_eq!(selector.get_index(), 2);
        assert_eq!(selector.default_index(), 2);
        assert_eq!(
            *log.borrow(),
            vec![
                "change:1:[10]",
                "sound:key_add",
                "change:2:[20]",
                "sound:key_add"
            ]
        );
    }

    #[test]
    fn test_get_value() {
        let mut selector = selector(&["a", "b"]);
        selector.move_right();
        let (element, index) = selector.get_value();
        assert_eq!(index, 1);
        assert_eq!(element, &Element::new("b", vec![10]));
    }

    #[test]
    fn test_set_value_by_label_and_index() {
        let mut selector = Selector::builder(
            "Mode",
            vec![Element::new("Item1", vec![0]), Element::new("Item2", vec![1])],
        )
        .build()
        .unwrap();
        selector.set_value(1).unwrap();
        assert_eq!(selector.get_index(), 1);
        selector.set_value("Item1").unwrap();
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_set_value_first_matching_label() {
        let mut selector = selector(&["a", "b", "a"]);
        selector.set_value(2).unwrap();
        selector.set_value("a").unwrap();
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_set_value_missing_label_is_not_found() {
        let mut selector = selector(&["Item1", "Item2"]);
        selector.set_value(1).unwrap();
        let err = selector.set_value("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(selector.get_index(), 1);
    }

    #[test]
    fn test_set_value_index_out_of_range() {
        let mut selector = selector(&["a", "b"]);
        assert_eq!(
            selector.set_value(2),
            Err(SelectorError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_reset_value() {
        let mut selector = Selector::builder("Mode", rows(&["a", "b", "c"]))
            .default_index(1)
            .build()
            .unwrap();
        selector.set_value(2).unwrap();
        crate::widget::Widget::reset_value(&mut selector);
        assert_eq!(selector.get_index(), 1);
        selector.set_default_value(0).unwrap();
        crate::widget::Widget::reset_value(&mut selector);
        assert_eq!(selector.get_index(), 0);
        assert!(selector.set_default_value(3).is_err());
    }

    #[test]
    fn test_readonly_navigation_is_noop() {
        let log = Log::default();
        let mut selector = logged_builder(&["a", "b"], &log).build().unwrap();
        selector.base.set_readonly(true);
        selector.move_right();
        selector.move_left();
        assert_eq!(selector.get_index(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_navigation_order_index_callback_sound() {
        let log = Log::default();
        let mut selector = logged_builder(&["a", "b", "c"], &log).build().unwrap();
        selector.move_left();
        assert_eq!(selector.get_index(), 2);
        assert_eq!(*log.borrow(), vec!["change:2:[20]", "sound:key_add"]);
    }

    #[test]
    fn test_update_elements_relocates_selected() {
        let mut selector = selector(&["a", "b", "c"]);
        selector.set_value(1).unwrap();
        selector
            .update_elements(vec![
                Element::new("x", vec![99]),
                Element::new("y", vec![98]),
                Element::new("b", vec![10]),
            ])
            .unwrap();
        assert_eq!(selector.get_index(), 2);
    }

    #[test]
    fn test_update_elements_resets_when_out_of_range() {
        let mut selector = Selector::builder("Mode", rows(&["a", "b", "c"]))
            .default_index(2)
            .build()
            .unwrap();
        selector.update_elements(rows(&["x", "y"])).unwrap();
        assert_eq!(selector.get_index(), 0);
        assert_eq!(selector.default_index(), 0);
    }

    #[test]
    fn test_update_elements_relocates_and_clamps_default() {
        let mut selector = Selector::builder("Mode", rows(&["a", "b", "c"]))
            .default_index(2)
            .build()
            .unwrap();
        selector.set_value(0).unwrap();
        selector
            .update_elements(vec![Element::new("x", vec![99]), Element::new("a", vec![0])])
            .unwrap();
        assert_eq!(selector.get_index(), 1);
        assert_eq!(selector.default_index(), 0);
    }

    #[test]
    fn test_update_elements_keeps_in_range_index() {
        let mut selector = selector(&["a", "b", "c"]);
        selector.set_value(1).unwrap();
        selector.update_elements(rows(&["x", "y", "z"])).unwrap();
        assert_eq!(selector.get_index(), 1);
        assert_eq!(selector.get_value().0.label, "y");
    }

    #[test]
    fn test_update_elements_rejects_empty() {
        let mut selector = selector(&["a", "b"]);
        selector.set_value(1).unwrap();
        assert_eq!(
            selector.update_elements(Vec::new()),
            Err(SelectorError::EmptyElements)
        );
        assert_eq!(selector.elements().len(), 2);
        assert_eq!(selector.get_index(), 1);
    }

    proptest! {
        #[test]
        fn prop_right_len_times_is_identity(len in 1usize..12, start in 0usize..12) {
            let start = start % len;
            let labels: Vec<String> = (0..len).map(|i| format!("item{i}")).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut selector = selector(&labels);
            selector.set_value(start).unwrap();
            for _ in 0..len {
                selector.move_right();
            }
            prop_assert_eq!(selector.get_index(), start);
        }

        #[test]
        fn prop_left_right_are_inverse(len in 1usize..12, start in 0usize..12) {
            let start = start % len;
            let labels: Vec<String> = (0..len).map(|i| format!("item{i}")).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut selector = selector(&labels);
            selector.set_value(start).unwrap();
            selector.move_left();
            selector.move_right();
            prop_assert_eq!(selector.get_index(), start);
            selector.move_right();
            selector.move_left();
            prop_assert_eq!(selector.get_index(), start);
            let (element, index) = selector.get_value();
            prop_assert_eq!(&element.label, &labels[index]);
        }
    }
}
