//! Option registry: the write-once/read-many set of options a single
//! program invocation matches against, plus the help-table rendering.

use crate::error::SetupError;
use crate::option::Opt;

/// Free-text lines around the help table and after usage errors. Owned by
/// the registry so applications can rebrand them without global state.
#[derive(Debug, Clone)]
pub struct HelpStyle {
    /// First line of the rendered help table.
    pub usage_note: String,
    /// Hint printed after a usage error message.
    pub help_note: String,
    /// Whether [`run`](crate::exec::run) appends `help_note` to errors.
    pub show_help_note: bool,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            usage_note: "Usage: [options]".to_string(),
            help_note: "Help: use -h to get usage information.".to_string(),
            show_help_note: true,
        }
    }
}

/// Opaque handle returned by [`Registry::register`]; also the key of the
/// translation map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptId(pub(crate) usize);

/// Set of registered options keyed by (short, long) identity.
///
/// Populated once at startup; the translator and execution engine only
/// read it. Lookup is linear, sized for registries of tens of options.
pub struct Registry {
    options: Vec<Opt>,
    style: HelpStyle,
}

impl Registry {
    /// Empty registry apart from the built-in `h`/`help` option.
    pub fn new() -> Self {
        Self::with_style(HelpStyle::default())
    }

    pub fn with_style(style: HelpStyle) -> Self {
        Self {
            options: vec![Opt::help()],
            style,
        }
    }

    /// Insert `option`, failing if its short or long name collides with
    /// either name of any already-registered option.
    pub fn register(&mut self, option: Opt) -> Result<OptId, SetupError> {
        for existing in &self.options {
            for name in [option.short(), option.long()] {
                if existing.short() == name || existing.long() == name {
                    return Err(SetupError::NameInUse(name.to_string()));
                }
            }
        }
        tracing::debug!(
            short = option.short(),
            long = option.long(),
            "registered option"
        );
        self.options.push(option);
        Ok(OptId(self.options.len() - 1))
    }

    pub fn find_short(&self, token: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.short() == token)
    }

    pub fn find_long(&self, token: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.long() == token)
    }

    pub(crate) fn position_short(&self, token: &str) -> Option<OptId> {
        self.options.iter().position(|o| o.short() == token).map(OptId)
    }

    pub(crate) fn position_long(&self, token: &str) -> Option<OptId> {
        self.options.iter().position(|o| o.long() == token).map(OptId)
    }

    /// Look up an option by the handle `register` returned.
    pub fn option(&self, id: OptId) -> Option<&Opt> {
        self.options.get(id.0)
    }

    pub(crate) fn get(&self, id: OptId) -> &Opt {
        &self.options[id.0]
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn style(&self) -> &HelpStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut HelpStyle {
        &mut self.style
    }

    /// Render the usage table: the usage note, then one `describe()` line
    /// per option sorted by short flag.
    pub fn render_help(&self) -> String {
        let mut options: Vec<&Opt> = self.options.iter().collect();
        options.sort_by(|a, b| a.short().cmp(b.short()));
        let mut out = self.style.usage_note.clone();
        out.push_str("\nOPTIONS:");
        for option in options {
            out.push('\n');
            out.push_str(&option.describe());
        }
        out
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
