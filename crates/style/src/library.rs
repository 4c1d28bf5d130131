use crate::attrs::Attr;
use crate::error::StyleError;
use crate::style::Style;
use log::debug;
use quire_types::Color;
use std::collections::BTreeMap;
use std::iter;

/// How a style being defined picks its ancestors.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Inherits {
    /// Only the ancestors implied by the style's kind.
    #[default]
    Default,
    /// The named styles, in priority order, followed by the implied ones.
    Names(Vec<String>),
    /// No inheritance at all.
    Disabled,
}

impl Inherits {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Inherits::Names(names.into_iter().map(Into::into).collect())
    }
}

/// A registry of named styles.
///
/// The `base` entry always exists and is applied last on every lookup, so
/// resolved styles always carry the defaults for anything left unset.
#[derive(Debug, Clone)]
pub struct StyleLibrary {
    styles: BTreeMap<String, Style>,
}

impl Default for StyleLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleLibrary {
    pub fn new() -> Self {
        let mut library = Self {
            styles: BTreeMap::new(),
        };
        library.seed("base", default_base());
        library.seed_convenience_styles();
        library
    }

    /// Uses `base` as the library's base style; its gaps are filled from the
    /// default base.
    pub fn with_base(mut base: Style) -> Result<Self, StyleError> {
        base.inherit([&default_base()]);
        base.validate()?;
        let mut library = Self {
            styles: BTreeMap::new(),
        };
        library.seed("base", base);
        library.seed_convenience_styles();
        Ok(library)
    }

    fn seed(&mut self, name: &str, mut style: Style) {
        style.set_name(name);
        self.styles.insert(name.to_string(), style);
    }

    fn seed_convenience_styles(&mut self) {
        self.seed("paragraph", Style::new());
        let mut table = Style::table().with_border_color(Color::black());
        table.attrs_mut().border = Attr::Set(1.0);
        self.seed("table", table);
    }

    /// Registers `style` under `name`, replacing any previous definition.
    pub fn define(&mut self, name: &str, mut style: Style, inherits: Inherits) -> Result<(), StyleError> {
        style.set_name(name);
        let ancestors = match inherits {
            Inherits::Disabled => Vec::new(),
            Inherits::Default => implicit_ancestors(&style),
            Inherits::Names(mut names) => {
                names.extend(implicit_ancestors(&style));
                names
            }
        };
        for ancestor in &ancestors {
            style.inherit([self.lookup(ancestor)?]);
        }
        style.validate()?;

        debug!("Defined {} '{}' inheriting {:?}", style.kind().label(), name, ancestors);
        self.styles.insert(name.to_string(), style);
        Ok(())
    }

    /// Alias of [`StyleLibrary::define`].
    pub fn add(&mut self, name: &str, style: Style, inherits: Inherits) -> Result<(), StyleError> {
        self.define(name, style, inherits)
    }

    /// A copy of the named style with `base` applied.
    pub fn get(&self, name: &str) -> Result<Style, StyleError> {
        self.get_with::<&str>(name, &[])
    }

    /// A copy of the named style with each of `inherits` applied in order,
    /// then `base`.
    pub fn get_with<S: AsRef<str>>(&self, name: &str, inherits: &[S]) -> Result<Style, StyleError> {
        let mut style = self.lookup(name)?.clone();
        for ancestor in inherits.iter().map(AsRef::as_ref).chain(iter::once("base")) {
            style.inherit([self.lookup(ancestor)?]);
        }
        Ok(style)
    }

    pub fn has_style(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn list(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }

    fn lookup(&self, name: &str) -> Result<&Style, StyleError> {
        self.styles
            .get(name)
            .ok_or_else(|| StyleError::Configuration(format!("Unknown style '{}'", name)))
    }
}

fn implicit_ancestors(style: &Style) -> Vec<String> {
    style
        .kind()
        .implicit_ancestors()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Black Helvetica 9pt, left aligned, without indentation or padding.
fn default_base() -> Style {
    let mut base = Style::new()
        .with_color(Color::black())
        .with_text_align("left")
        .with_text_indent(0.0)
        .with_font_family("Helvetica")
        .with_font_size(9.0)
        .with_font_style("normal")
        .with_padding("0")
        .with_space_before(0.0)
        .with_first_line_indent(0.0);
    let attrs = base.attrs_mut();
    attrs.text_transform = Attr::Null;
    attrs.background_color = Attr::Null;
    attrs.border_color = Attr::Null;
    attrs.width = Attr::Null;
    attrs.height = Attr::Null;
    attrs.line_height = Attr::Null;
    base
}
