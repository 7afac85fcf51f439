/// Called with the new selection flag and the widget id
pub type SelectCallback = Box<dyn FnMut(bool, &str)>;

/// Called with the widget id once per update that changed the widget
pub type UpdateCallback = Box<dyn FnMut(&str)>;
