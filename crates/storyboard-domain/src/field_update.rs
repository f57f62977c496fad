/// Three-state edit of an optional card field.
///
/// `NoChange` keeps the current value, `Set` replaces it, `Clear` removes it.
///
/// ```
/// use storyboard_domain::FieldUpdate;
///
/// let mut notes = Some("first pass".to_string());
/// FieldUpdate::Set("second pass".to_string()).apply_to(&mut notes);
/// assert_eq!(notes.as_deref(), Some("second pass"));
///
/// FieldUpdate::Clear.apply_to(&mut notes);
/// assert_eq!(notes, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Build an update from command-line style input: a clear flag wins over
    /// a value, and no value means no change.
    ///
    /// ```
    /// use storyboard_domain::FieldUpdate;
    ///
    /// assert_eq!(FieldUpdate::from_input(Some(3), false), FieldUpdate::Set(3));
    /// assert_eq!(FieldUpdate::from_input(Some(3), true), FieldUpdate::Clear);
    /// assert_eq!(FieldUpdate::<u8>::from_input(None, false), FieldUpdate::NoChange);
    /// ```
    pub fn from_input(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldUpdate::Clear,
            (Some(value), false) => FieldUpdate::Set(value),
            (None, false) => FieldUpdate::NoChange,
        }
    }
}

impl FieldUpdate<String> {
    /// Setting blank text is the same as clearing the field.
    pub fn non_blank(self) -> Self {
        match self {
            FieldUpdate::Set(s) if s.trim().is_empty() => FieldUpdate::Clear,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
