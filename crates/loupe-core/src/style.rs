use std::fmt;

/// Whether a created element is currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Ordered set of `property: value` declarations.
///
/// Built from opaque style strings such as `"opacity: 0.6;background-color: red;"`.
/// Appending more text keeps declaration order but a repeated property
/// replaces the earlier value in place (last write wins). Visibility is never
/// stored here; it is driven separately through [`Visibility`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    declarations: Vec<(String, String)>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style string. Malformed fragments (no `:`) are skipped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        style.append(text);
        style
    }

    /// Append declarations from `text`, replacing values of properties
    /// that are already present.
    pub fn append(&mut self, text: &str) {
        for fragment in text.split(';') {
            let Some((name, value)) = fragment.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            self.set(name, value);
        }
    }

    /// Set `name` to `value`, replacing an existing declaration in place.
    /// Names are matched case-insensitively and stored lowercase.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.declarations
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Numeric value of a property, e.g. `opacity`.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for StyleOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.declarations {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{name}: {value};")?;
            first = false;
        }
        Ok(())
    }
}
