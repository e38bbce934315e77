/// Default limit for [`EvalOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings that change how an expression is evaluated.
///
/// The defaults reproduce the lenient behavior: missing closing parentheses
/// and trailing tokens are ignored, and both operands of `and`/`or` are
/// always evaluated.
///
/// # Example
/// ```
/// use ruleval::EvalOptions;
///
/// let options = EvalOptions::default().with_strict(true).with_max_depth(16);
///
/// assert!(options.strict);
/// assert!(!options.short_circuit);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum nesting of parenthesised groups, call arguments and `not`
    /// prefixes before evaluation fails with `DepthExceeded`.
    ///
    /// Every level is a native recursion, so the evaluating thread's stack
    /// has to fit the chosen limit. The default fits comfortably in a 2 MiB
    /// thread stack; limits in the thousands need a larger stack.
    pub max_depth:     usize,
    /// Report unclosed parentheses and unconsumed trailing tokens as errors.
    pub strict:        bool,
    /// Skip the right operand of `and`/`or` once the left operand decides
    /// the result. The skipped operand is still parsed but performs no
    /// lookups or calls.
    pub short_circuit: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth:     DEFAULT_MAX_DEPTH,
               strict:        false,
               short_circuit: false, }
    }
}

impl EvalOptions {
    /// Sets [`EvalOptions::max_depth`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets [`EvalOptions::strict`].
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets [`EvalOptions::short_circuit`].
    #[must_use]
    pub const fn with_short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit = short_circuit;
        self
    }
}
