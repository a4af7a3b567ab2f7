// Options controlling how diagnostics are unpacked.

/// Configuration for [`crate::unpack::unpack_lint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackOptions {
    /// When true, a `Replace` or `InsertAfter` suggestion with empty
    /// replacement text fails the unpack with `InvalidInput`.
    /// When false it is kept as-is (applying it is a pure deletion or a
    /// no-op insertion) and a warning is logged. Default: false.
    pub require_replacement_text: bool,

    /// Keep at most this many suggestions per lint, preferred first.
    /// Default: no limit.
    pub max_suggestions: Option<usize>,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            require_replacement_text: false,
            max_suggestions: None,
        }
    }
}

impl UnpackOptions {
    /// Options that reject empty replacement text.
    pub fn strict() -> Self {
        Self {
            require_replacement_text: true,
            ..Self::default()
        }
    }

    pub fn set_require_replacement_text(&mut self, value: bool) {
        self.require_replacement_text = value;
    }

    pub fn set_max_suggestions(&mut self, value: Option<usize>) {
        self.max_suggestions = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_tolerant() {
        let opts = UnpackOptions::default();
        assert!(!opts.require_replacement_text);
        assert_eq!(opts.max_suggestions, None);
    }

    #[test]
    fn strict_only_changes_text_check() {
        let opts = UnpackOptions::strict();
        assert!(opts.require_replacement_text);
        assert_eq!(opts.max_suggestions, None);
    }

    #[test]
    fn setters() {
        let mut opts = UnpackOptions::default();
        opts.set_require_replacement_text(true);
        opts.set_max_suggestions(Some(3));
        assert_eq!(
            opts,
            UnpackOptions {
                require_replacement_text: true,
                max_suggestions: Some(3),
            }
        );
    }
}
