//! Configuration for drop extraction.

/// Denominator used when a unit declares no `random(N)` total.
pub const DEFAULT_TOTAL: u64 = 128;

/// Public name of the table whose non-first entries are members-only.
pub const RARE_DROP_TABLE: &str = "rare_drop_table";

/// Configuration for branch extraction and shared-table resolution.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    /// Branch denominator when no `random(N)` total is declared.
    pub default_total: u64,

    /// Counter variable tested by branch headers when none is declared.
    pub default_counter: String,

    /// Public table name to internal procedure name.
    pub aliases: Vec<(String, String)>,

    /// Public name of the table the rare-table members rule applies to.
    pub rare_table: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_total: DEFAULT_TOTAL,
            default_counter: "random".to_string(),
            aliases: vec![
                (RARE_DROP_TABLE.to_string(), "randomherb".to_string()),
                ("gem_drop_table".to_string(), "randomjewel".to_string()),
            ],
            rare_table: RARE_DROP_TABLE.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Builder method to set the default branch denominator.
    ///
    /// Zero is ignored.
    #[must_use]
    pub fn with_default_total(mut self, total: u64) -> Self {
        if total > 0 {
            self.default_total = total;
        }
        self
    }

    /// Builder method to set the default counter variable.
    #[must_use]
    pub fn with_default_counter(mut self, counter: impl Into<String>) -> Self {
        self.default_counter = counter.into();
        self
    }

    /// Builder method to add or replace an alias.
    #[must_use]
    pub fn with_alias(mut self, public: impl Into<String>, internal: impl Into<String>) -> Self {
        let public = public.into();
        let internal = internal.into();
        self.aliases.retain(|(p, _)| *p != public);
        self.aliases.push((public, internal));
        self
    }

    /// Builder method to clear the alias map.
    #[must_use]
    pub fn without_aliases(mut self) -> Self {
        self.aliases.clear();
        self
    }

    /// Builder method to set which public table gets the rare-table rule.
    #[must_use]
    pub fn with_rare_table(mut self, public: impl Into<String>) -> Self {
        self.rare_table = public.into();
        self
    }

    /// Translates a public name to its internal procedure name.
    ///
    /// Names without an alias are returned unchanged.
    #[must_use]
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(public, _)| public == name)
            .map_or(name, |(_, internal)| internal.as_str())
    }

    /// Returns the public name of an internal procedure, if it has one.
    #[must_use]
    pub fn public_name(&self, internal: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, i)| i == internal)
            .map(|(public, _)| public.as_str())
    }

    /// Returns true if the procedure is the rare table.
    #[must_use]
    pub fn is_rare_table(&self, internal: &str) -> bool {
        self.canonical(&self.rare_table) == internal
    }
}
